use rand::Rng;
use time::Duration;

/// Validity window for a reset challenge, measured from challenge creation.
pub const OTP_VALIDITY: Duration = Duration::minutes(5);

/// Generate an 8-digit numeric one-time code, uniform over
/// [10000000, 99999999]. The caller hashes it before persisting; the
/// plaintext only ever leaves the process inside the reset email.
pub fn generate() -> String {
    let code: u32 = rand::thread_rng().gen_range(10_000_000..100_000_000);
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_eight_digits() {
        for _ in 0..100 {
            let otp = generate();
            assert_eq!(otp.len(), 8);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(otp.as_bytes()[0], b'0');
        }
    }

    #[test]
    fn validity_window_is_five_minutes() {
        assert_eq!(OTP_VALIDITY.whole_seconds(), 300);
    }
}
