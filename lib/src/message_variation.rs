use rand::seq::SliceRandom;

const MARKERS: [&str; 6] = [" ", ".", " 🙏", " 😊", " 👍", " ✨"];

/// Appends one random trailing marker so consecutive messages are not byte-identical.
pub fn vary(body: &str) -> String {
    let marker = MARKERS.choose(&mut rand::thread_rng()).copied().unwrap_or_default();

    format!("{body}{marker}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_keep_original_body_as_prefix() {
        for _ in 0..20 {
            let varied = vary("Hello group");
            assert!(varied.starts_with("Hello group"));
            assert!(MARKERS.iter().any(|marker| varied == format!("Hello group{marker}")));
        }
    }
}
