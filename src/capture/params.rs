//! Conversion of flat parameter lists into nested JSON maps.
//!
//! Keys use bracket syntax: `a[]` appends to a list, `a[b]` nests a map,
//! and the forms combine (`a[b][]`). A plain duplicate key overwrites.

use serde_json::{Map, Value};

use super::{FileList, UploadedFile};

/// Build a map from a parameter list, honoring bracket nesting.
pub fn params_to_map(params: &[(String, String)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in params {
        insert_param(&mut map, key, Value::String(value.clone()));
    }
    map
}

/// Deepest bracket nesting accepted in a key. Deeper keys are discarded.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Insert a single value under a possibly bracketed key.
pub fn insert_param(map: &mut Map<String, Value>, key: &str, value: Value) {
    let (base, segments) = split_key(key);
    if segments.is_empty() {
        map.insert(base.to_string(), value);
        return;
    }

    if segments.len() > MAX_NESTING_DEPTH {
        tracing::debug!(
            key = %base,
            max_depth = MAX_NESTING_DEPTH,
            "discarding parameter nested too deeply"
        );
        return;
    }

    let slot = map.entry(base.to_string()).or_insert(Value::Null);
    assign(slot, &segments, value);
}

/// Build the uploaded-file map.
///
/// A field with one file maps to its metadata object. A field with several
/// files maps to one list per metadata column.
pub fn files_to_map(files: &FileList) -> Map<String, Value> {
    let mut map = Map::new();
    for (field, uploads) in files {
        let value = match uploads.as_slice() {
            [single] => file_value(single),
            many => columns(many),
        };
        map.insert(field.clone(), value);
    }
    map
}

fn file_value(file: &UploadedFile) -> Value {
    serde_json::to_value(file).unwrap_or(Value::Null)
}

fn columns(files: &[UploadedFile]) -> Value {
    let mut out = Map::new();
    out.insert(
        "name".into(),
        files.iter().map(|f| Value::from(f.name.as_str())).collect(),
    );
    out.insert(
        "type".into(),
        files.iter().map(|f| Value::from(f.mime_type.as_str())).collect(),
    );
    out.insert(
        "tmp_name".into(),
        files.iter().map(|f| Value::from(f.tmp_name.as_str())).collect(),
    );
    out.insert(
        "error".into(),
        files.iter().map(|f| Value::from(f.error)).collect(),
    );
    out.insert(
        "size".into(),
        files.iter().map(|f| Value::from(f.size)).collect(),
    );
    Value::Object(out)
}

/// Split `base[seg1][seg2]` into its base and bracket segments.
/// Keys without a well-formed bracket suffix are returned whole.
///
/// Collection stops one segment past [`MAX_NESTING_DEPTH`].
fn split_key(key: &str) -> (&str, Vec<&str>) {
    let open = match key.find('[') {
        Some(0) | None => return (key, Vec::new()),
        Some(pos) => pos,
    };

    let mut segments = Vec::new();
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            break;
        };
        segments.push(&stripped[..close]);
        if segments.len() > MAX_NESTING_DEPTH {
            break;
        }
        rest = &stripped[close + 1..];
    }

    if segments.is_empty() {
        return (key, segments);
    }
    (&key[..open], segments)
}

/// Walk `segments` down from `slot`, creating containers as needed.
fn assign(slot: &mut Value, segments: &[&str], value: Value) {
    let mut slot = slot;
    for segment in segments {
        slot = child_slot(slot, segment);
    }
    *slot = value;
}

/// Slot for one bracket segment. An empty segment appends.
///
/// Lists are re-keyed by index when a named segment reaches them, and
/// scalars are replaced by a container.
fn child_slot<'a>(slot: &'a mut Value, segment: &str) -> &'a mut Value {
    let is_target = match slot {
        Value::Object(_) => true,
        Value::Array(_) => segment.is_empty(),
        _ => false,
    };
    if !is_target {
        *slot = match std::mem::take(slot) {
            Value::Array(items) => Value::Object(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect(),
            ),
            _ if segment.is_empty() => Value::Array(Vec::new()),
            _ => Value::Object(Map::new()),
        };
    }
    match slot {
        Value::Object(obj) => {
            let key = if segment.is_empty() {
                next_index(obj)
            } else {
                segment.to_string()
            };
            obj.entry(key).or_insert(Value::Null)
        }
        Value::Array(items) => {
            items.push(Value::Null);
            let last = items.len() - 1;
            &mut items[last]
        }
        _ => unreachable!("slot was converted to a container above"),
    }
}

/// One past the largest integer key, or 0.
fn next_index(obj: &Map<String, Value>) -> String {
    obj.keys()
        .filter_map(|key| index_key(key))
        .max()
        .map_or(0, |max| max.saturating_add(1))
        .to_string()
}

/// Parse a key written as a canonical non-negative integer ("7", not "07").
fn index_key(key: &str) -> Option<u64> {
    let index: u64 = key.parse().ok()?;
    (index.to_string() == key).then_some(index)
}
