/// Ordered header list. Names keep the casing they were first set with;
/// every lookup is ASCII case-insensitive.
pub type Headers = Vec<(String, String)>;

pub fn header_set(headers: &mut Headers, name: impl Into<String>, value: impl Into<String>) {
    let name = name.into();
    let value = value.into();
    if let Some((_, v)) = headers
        .iter_mut()
        .find(|(k, _)| k.eq_ignore_ascii_case(&name))
    {
        *v = value;
        return;
    }
    headers.push((name, value));
}

pub fn header_get<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

pub fn header_remove(headers: &mut Headers, name: &str) -> Option<String> {
    let idx = headers
        .iter()
        .position(|(k, _)| k.eq_ignore_ascii_case(name))?;
    Some(headers.remove(idx).1)
}

/// Layers `overlay` on top of `headers`; entries in `overlay` win.
pub fn header_merge(headers: &mut Headers, overlay: Headers) {
    for (name, value) in overlay {
        header_set(headers, name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_case_insensitively_and_keeps_order() {
        let mut headers: Headers = vec![
            ("Authorization".to_string(), "Bearer t".to_string()),
            ("user-agent".to_string(), "old".to_string()),
        ];
        header_merge(
            &mut headers,
            vec![
                ("User-Agent".to_string(), "new".to_string()),
                ("X-Extra".to_string(), "1".to_string()),
            ],
        );
        assert_eq!(headers.len(), 3);
        assert_eq!(header_get(&headers, "USER-AGENT"), Some("new"));
        assert_eq!(headers[1].0, "user-agent");
        assert_eq!(header_remove(&mut headers, "x-extra").as_deref(), Some("1"));
        assert_eq!(header_get(&headers, "x-extra"), None);
    }
}
