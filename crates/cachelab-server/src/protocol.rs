//! Wire protocol decode and request dispatch (§4.9, §6).
//!
//! Kept free of any socket I/O so it can be exercised directly in tests:
//! [`dispatch`] takes the raw request bytes and a cache reference, and
//! returns the exact bytes the server writes back.

use cachelab_core::{CachePolicy, Dataset};

/// A decoded request line. Only `fetch` is a known command (§4.9).
enum Request<'a> {
    Fetch(&'a str),
    Unknown,
}

/// Trims trailing NUL bytes (left over from a short read into a fixed
/// buffer) and splits the first two comma-separated fields.
fn parse_request(raw: &[u8]) -> Request<'_> {
    let text = std::str::from_utf8(raw).unwrap_or("").trim_end_matches('\0');
    let mut fields = text.splitn(2, ',');
    match (fields.next(), fields.next()) {
        (Some("fetch"), Some(key)) => Request::Fetch(key.trim()),
        _ => Request::Unknown,
    }
}

/// Decodes `raw` and dispatches it against `dataset`/`cache`, returning the
/// full response to write back to the client (§4.9).
///
/// `cache.present`/`get`/`put` are the only cache operations a request ever
/// performs; the caller is responsible for serializing access across
/// connections (§5).
pub fn dispatch(raw: &[u8], dataset: &Dataset, cache: &mut impl CachePolicy) -> String {
    match parse_request(raw) {
        Request::Fetch(key) => fetch(key, dataset, cache),
        Request::Unknown => "Bad Command".to_string(),
    }
}

fn fetch(key: &str, dataset: &Dataset, cache: &mut impl CachePolicy) -> String {
    if cache.present(key) {
        let entry = cache
            .get(key)
            .expect("present() just confirmed this key is resident");
        return format!("VALUE:{}\nCOST:0\n", entry.value);
    }

    match dataset.get(key) {
        Some(entry) => {
            let response = format!("VALUE:{}\nCOST:{}\n", entry.value, entry.cost);
            cache.put(key, entry.clone());
            response
        }
        None => format!("No Entry For Key: {key}\n"),
    }
}
