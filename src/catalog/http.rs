//! HTTP status code constants.
//!
//! Plain `u16` values so they can be passed straight to envelope builders,
//! which forward any integer without validation.

macro_rules! status_codes {
    ($( $(#[$doc:meta])* ($code:literal, $name:ident, $phrase:literal); )+) => {
        $(
            $(#[$doc])*
            pub const $name: u16 = $code;
        )+

        /// Every declared status code, in ascending order.
        pub const ALL: &[u16] = &[$($code),+];

        /// Canonical reason phrase for a declared status code.
        pub fn reason(code: u16) -> Option<&'static str> {
            match code {
                $($code => Some($phrase),)+
                _ => None,
            }
        }
    };
}

status_codes! {
    // 1xx informational
    /// The client should continue with the request.
    (100, CONTINUE, "Continue");
    /// The server is switching to the protocol named in the Upgrade header.
    (101, SWITCHING_PROTOCOLS, "Switching Protocols");
    /// The request was accepted but processing has not completed.
    (102, PROCESSING, "Processing");
    /// Lets the user agent preload resources while the response is prepared.
    (103, EARLY_HINTS, "Early Hints");

    // 2xx success
    /// The request succeeded.
    (200, OK, "OK");
    /// The request succeeded and a resource was created.
    (201, CREATED, "Created");
    /// The request was received but not yet acted upon.
    (202, ACCEPTED, "Accepted");
    /// The payload was modified by a transforming proxy.
    (203, NON_AUTHORITATIVE_INFORMATION, "Non-Authoritative Information");
    /// The request succeeded and there is no body.
    (204, NO_CONTENT, "No Content");
    /// The client should reset the document view.
    (205, RESET_CONTENT, "Reset Content");
    /// The body contains the requested range.
    (206, PARTIAL_CONTENT, "Partial Content");
    /// Status for multiple independent operations.
    (207, MULTI_STATUS, "Multi-Status");
    /// Members of a binding were already enumerated.
    (208, ALREADY_REPORTED, "Already Reported");
    /// The response is the result of instance manipulations.
    (226, IM_USED, "IM Used");

    // 3xx redirection
    /// More than one possible response.
    (300, MULTIPLE_CHOICES, "Multiple Choices");
    /// The resource moved permanently to the Location URL.
    (301, MOVED_PERMANENTLY, "Moved Permanently");
    /// The resource moved temporarily to the Location URL.
    (302, FOUND, "Found");
    /// The result lives at another URL.
    (303, SEE_OTHER, "See Other");
    /// No need to retransmit the resource.
    (304, NOT_MODIFIED, "Not Modified");
    /// The resource must be accessed through a proxy.
    (305, USE_PROXY, "Use Proxy");
    /// Reserved, no longer used.
    (306, UNUSED, "Unused");
    /// Temporary redirect, method preserved.
    (307, TEMPORARY_REDIRECT, "Temporary Redirect");
    /// Permanent redirect, method preserved.
    (308, PERMANENT_REDIRECT, "Permanent Redirect");

    // 4xx client errors
    /// The request is malformed.
    (400, BAD_REQUEST, "Bad Request");
    /// Valid authentication credentials are missing.
    (401, UNAUTHORIZED, "Unauthorized");
    /// Reserved for digital payment systems.
    (402, PAYMENT_REQUIRED, "Payment Required");
    /// The server refuses to authorize the request.
    (403, FORBIDDEN, "Forbidden");
    /// The resource does not exist.
    (404, NOT_FOUND, "Not Found");
    /// The method is not supported by the resource.
    (405, METHOD_NOT_ALLOWED, "Method Not Allowed");
    /// No representation matches the Accept headers.
    (406, NOT_ACCEPTABLE, "Not Acceptable");
    /// The client must authenticate with the proxy.
    (407, PROXY_AUTHENTICATION_REQUIRED, "Proxy Authentication Required");
    /// The server wants to close this idle connection.
    (408, REQUEST_TIMEOUT, "Request Timeout");
    /// The request conflicts with the resource state.
    (409, CONFLICT, "Conflict");
    /// The resource is permanently gone.
    (410, GONE, "Gone");
    /// Content-Length is required.
    (411, LENGTH_REQUIRED, "Length Required");
    /// A precondition header failed.
    (412, PRECONDITION_FAILED, "Precondition Failed");
    /// The body exceeds the server limit.
    (413, PAYLOAD_TOO_LARGE, "Payload Too Large");
    /// The URI is too long.
    (414, URI_TOO_LONG, "URI Too Long");
    /// The payload format is unsupported.
    (415, UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type");
    /// The requested range cannot be served.
    (416, RANGE_NOT_SATISFIABLE, "Range Not Satisfiable");
    /// The Expect header could not be met.
    (417, EXPECTATION_FAILED, "Expectation Failed");
    /// The server is a teapot.
    (418, IM_A_TEAPOT, "I'm a teapot");
    /// The server cannot produce a response for this request.
    (421, MISDIRECTED_REQUEST, "Misdirected Request");
    /// The instructions in the body could not be processed.
    (422, UNPROCESSABLE_ENTITY, "Unprocessable Entity");
    /// The resource is locked.
    (423, LOCKED, "Locked");
    /// A request this one depended on failed.
    (424, FAILED_DEPENDENCY, "Failed Dependency");
    /// The request might be replayed.
    (425, TOO_EARLY, "Too Early");
    /// The client must switch protocols.
    (426, UPGRADE_REQUIRED, "Upgrade Required");
    /// The request must be conditional.
    (428, PRECONDITION_REQUIRED, "Precondition Required");
    /// Rate limited.
    (429, TOO_MANY_REQUESTS, "Too Many Requests");
    /// The header fields are too large.
    (431, REQUEST_HEADER_FIELDS_TOO_LARGE, "Request Header Fields Too Large");
    /// Unavailable for legal reasons.
    (451, UNAVAILABLE_FOR_LEGAL_REASONS, "Unavailable For Legal Reasons");
    /// The client closed the connection before the response.
    (499, CLIENT_CLOSED_REQUEST, "Client Closed Request");

    // 5xx server errors
    /// The server hit an unexpected condition.
    (500, INTERNAL_SERVER_ERROR, "Internal Server Error");
    /// The functionality is not supported.
    (501, NOT_IMPLEMENTED, "Not Implemented");
    /// The upstream server sent an invalid response.
    (502, BAD_GATEWAY, "Bad Gateway");
    /// The server is not ready.
    (503, SERVICE_UNAVAILABLE, "Service Unavailable");
    /// The upstream server did not respond in time.
    (504, GATEWAY_TIMEOUT, "Gateway Timeout");
    /// The HTTP version is not supported.
    (505, VERSION_NOT_SUPPORTED, "HTTP Version Not Supported");
    /// Content negotiation is misconfigured.
    (506, VARIANT_ALSO_NEGOTIATES, "Variant Also Negotiates");
    /// The server cannot store the representation.
    (507, INSUFFICIENT_STORAGE, "Insufficient Storage");
    /// An infinite loop was detected.
    (508, LOOP_DETECTED, "Loop Detected");
    /// Further extensions are required.
    (510, NOT_EXTENDED, "Not Extended");
    /// Network access requires authentication.
    (511, NETWORK_AUTHENTICATION_REQUIRED, "Network Authentication Required");
    /// Network connection timed out.
    (599, NETWORK_CONNECT_TIMEOUT_ERROR, "Network Connect Timeout Error");
}
