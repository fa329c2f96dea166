use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::StreamRecord;

/// Decoded form of a query-string body: field name to ordered values.
/// Fields may legally repeat, so every value is kept in arrival order.
type FieldMap = HashMap<String, Vec<String>>;

fn decode_fields(raw: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        fields
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    fields
}

fn first(fields: &FieldMap, key: &str) -> Option<String> {
    fields.get(key).and_then(|values| values.first()).cloned()
}

/// Parses the raw `get_video_info` body into the list of stream variants.
///
/// The answer is a query string whose `url_encoded_fmt_stream_map` field
/// holds a comma-separated list of nested query strings, one per variant.
/// Malformed variants are skipped; an answer that yields no variant at all
/// is an error, never an empty success.
pub(crate) fn parse(raw: &str) -> Result<Vec<StreamRecord>> {
    let answer = decode_fields(raw);

    let status = first(&answer, "status").ok_or(Error::MissingStatus)?;
    match status.as_str() {
        "ok" => {}
        "fail" => {
            return Err(Error::StatusFail {
                reason: first(&answer, "reason")
            });
        }
        _ => return Err(Error::UnexpectedInfoStatus(status))
    }

    let stream_map = first(&answer, "url_encoded_fmt_stream_map").ok_or(Error::MissingStreamMap)?;

    let title = first(&answer, "title").unwrap_or_default();
    let author = first(&answer, "author").unwrap_or_default();

    let mut streams = Vec::new();
    for (position, entry) in stream_map.split(',').enumerate() {
        let fields = decode_fields(entry);

        let (Some(quality), Some(media_type), Some(url)) = (
            first(&fields, "quality"),
            first(&fields, "type"),
            first(&fields, "url")
        ) else {
            tracing::debug!(position, "skipping incomplete stream entry");
            continue;
        };

        tracing::debug!(position, %quality, %media_type, "stream found");
        streams.push(StreamRecord {
            quality,
            media_type,
            url,
            title: title.clone(),
            author: author.clone()
        });
    }

    if streams.is_empty() {
        return Err(Error::EmptyStreamList);
    }
    Ok(streams)
}
