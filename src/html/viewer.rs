//! Document viewer and error pages

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::pages::{ImagePage, QualityTier};

/// Render one page of a document's images with previous/next links
pub fn render_document_page(document_id: &str, page: &ImagePage, quality: QualityTier) -> String {
    let title = encode_text(document_id);
    let mut html = String::with_capacity(1024 + page.images.len() * 96);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<header><h1>{}</h1><p>Page {} &middot; {} quality</p></header>\n",
        title,
        page.page,
        quality.as_str()
    ));

    html.push_str("<main class=\"pages\">\n");
    if page.images.is_empty() {
        html.push_str("<p class=\"empty\">No images on this page.</p>\n");
    }
    for (index, url) in page.images.iter().enumerate() {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"Page image {}\" loading=\"lazy\">\n",
            encode_double_quoted_attribute(url),
            index + 1
        ));
    }
    html.push_str("</main>\n");

    html.push_str("<nav>\n");
    if page.page > 1 {
        html.push_str(&nav_link(document_id, page.page - 1, quality, "Previous"));
    }
    if page.has_more {
        html.push_str(&nav_link(document_id, page.page + 1, quality, "Next"));
    }
    html.push_str("</nav>\n</body>\n</html>\n");

    html
}

/// Render a minimal error page
pub fn render_error_page(message: &str) -> String {
    let message = encode_text(message);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{0}</title>\n{1}</head>\n<body>\n<main class=\"error\"><h1>{0}</h1></main>\n</body>\n</html>\n",
        message, STYLE
    )
}

fn nav_link(document_id: &str, page: usize, quality: QualityTier, label: &str) -> String {
    let href = format!(
        "/document/{}?page={}&quality={}",
        urlencoding::encode(document_id),
        page,
        quality.as_str()
    );
    format!(
        "<a href=\"{}\">{}</a>\n",
        encode_double_quoted_attribute(&href),
        label
    )
}

const STYLE: &str = "<style>\
body{margin:0;font-family:system-ui,sans-serif;background:#f4f4f4;color:#222}\
header,nav{padding:1rem;text-align:center}\
.pages{display:flex;flex-direction:column;align-items:center;gap:1rem}\
.pages img{max-width:100%;box-shadow:0 1px 4px rgba(0,0,0,.2)}\
nav a{margin:0 1rem}\
.error{padding:4rem;text-align:center}\
</style>\n";
