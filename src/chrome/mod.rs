use rocket::request::{FromRequest, Outcome, Request};

pub mod contact;
pub mod intro;
pub mod navbar;
pub mod scroll;

/// Whether the client asked for reduced motion, via the
/// `Sec-CH-Prefers-Reduced-Motion` client hint. Absent hint means animate;
/// the emitted scripts still check `prefers-reduced-motion` themselves for
/// clients that never send the header.
#[derive(Debug, Clone, Copy)]
pub struct MotionPrefs {
    pub reduced: bool,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for MotionPrefs {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let reduced = request
            .headers()
            .get_one("Sec-CH-Prefers-Reduced-Motion")
            .map(|v| v.trim().trim_matches('"') == "reduce")
            .unwrap_or(false);
        Outcome::Success(MotionPrefs { reduced })
    }
}
