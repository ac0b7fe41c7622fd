//! The hand-off parameter: a percent-encoded `city=` query value, the only
//! channel through which the lookup surface and the detail surface compose.

/// Query key carrying the city between the two surfaces.
pub const CITY_PARAM: &str = "city";

/// Encode a city into the hand-off query fragment, e.g. `city=New%20York`.
pub fn to_query(city: &str) -> String {
    format!("{CITY_PARAM}={}", urlencoding::encode(city))
}

/// Pull the city out of a hand-off query string.
///
/// Missing key, empty value, and undecodable bytes all yield `None`; the
/// detail surface answers those with its guidance message, not an error.
pub fn city_from_query(query: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != CITY_PARAM {
            return None;
        }
        let decoded = urlencoding::decode(value).ok()?;
        (!decoded.is_empty()).then(|| decoded.into_owned())
    })
}
