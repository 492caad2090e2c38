// user-visible strings, kept verbatim from the site's language

pub const CONTACT_THANKS: &str =
    "Cảm ơn! Chúng tôi đã nhận được yêu cầu. Đội ngũ sẽ phản hồi trong vòng 24h.";

pub const PAGE_LOAD_FAILED: &str = r#"<div class="p-4 text-danger">Không thể tải trang</div>"#;

/// Inline block shown in a region whose fragment could not be fetched.
pub fn fragment_load_failed(url: &str) -> String {
    format!(r#"<div class="p-4 text-danger">Không thể tải {}</div>"#, url)
}
