//! One-shot flash messages carried on a cookie.
//!
//! A redirect queues the message with [`set`]; the next rendered page pulls
//! it out with [`take`], which also expires the cookie so the message shows
//! exactly once.

use axum::http::{header, HeaderMap, HeaderValue};

const COOKIE_NAME: &str = "flash";

/// Queue a message for the next rendered page.
pub fn set(headers: &mut HeaderMap, message: &str) {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly",
        COOKIE_NAME,
        urlencoding::encode(message)
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Pull the pending message out of the request, expiring the cookie on the
/// response so it is not shown again.
pub fn take(request: &HeaderMap, response: &mut HeaderMap) -> Option<String> {
    let raw = request.get(header::COOKIE)?.to_str().ok()?;
    let value = raw
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value)?;

    let expire = format!("{}=; Path=/; HttpOnly; Max-Age=0", COOKIE_NAME);
    if let Ok(header_value) = HeaderValue::from_str(&expire) {
        response.append(header::SET_COOKIE, header_value);
    }

    match urlencoding::decode(value) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_take_round_trips_the_message() {
        let mut redirect_headers = HeaderMap::new();
        set(&mut redirect_headers, "Empty values not accepted");

        let cookie = redirect_headers
            .get(header::SET_COOKIE)
            .expect("flash should set a cookie")
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("flash="));
        assert!(cookie.contains("HttpOnly"));

        // Simulate the browser echoing the cookie back on the next request.
        let mut request = HeaderMap::new();
        let pair = cookie.split(';').next().unwrap();
        request.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());

        let mut response = HeaderMap::new();
        let message = take(&request, &mut response);
        assert_eq!(message.as_deref(), Some("Empty values not accepted"));

        // The response must expire the cookie.
        let clearing = response.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(clearing.contains("Max-Age=0"));
    }

    #[test]
    fn take_without_cookie_yields_nothing() {
        let request = HeaderMap::new();
        let mut response = HeaderMap::new();
        assert_eq!(take(&request, &mut response), None);
        assert!(response.get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn take_ignores_unrelated_cookies() {
        let mut request = HeaderMap::new();
        request.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; other=1"),
        );
        let mut response = HeaderMap::new();
        assert_eq!(take(&request, &mut response), None);
    }
}
