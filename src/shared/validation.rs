use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for accepted tracking identifiers (after upper-casing)
    /// `SR` followed by 4-32 upper-case alphanumerics, which covers both freshly
    /// generated ids and the shorter legacy ones
    /// - Valid: "SR1735502A8B3", "SRMGX1Q2W3AB12CD34"
    /// - Invalid: "SR", "XR1234", "SR12-34", "sr1234" (before normalisation)
    pub static ref TRACKING_ID_REGEX: Regex = Regex::new(r"^SR[0-9A-Z]{4,32}$").unwrap();

    /// Regex for attachment references the intake form accepts
    /// Must carry one of the supported document or image extensions
    /// - Valid: "photo.jpg", "evidence/Scan 1.PDF", "notes.docx"
    /// - Invalid: "script.exe", "archive.zip", "jpg"
    pub static ref ATTACHMENT_REGEX: Regex =
        Regex::new(r"(?i)^[^\x00-\x1f]+\.(jpg|jpeg|png|pdf|doc|docx)$").unwrap();
}
