use crate::core::capacity::{LayoutMode, PageSize};
use crate::core::render::Theme;
use crate::domain::model::{PrintDocument, RenderedPage};

pub const PAGE_BREAK: &str = r#"<div class="page-break"></div>"#;

#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub page_size: PageSize,
    pub layout: LayoutMode,
    pub theme: Theme,
    pub double_sided: bool,
    pub title: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            layout: LayoutMode::default(),
            theme: Theme::default(),
            double_sided: false,
            title: "Gallery print".to_string(),
        }
    }
}

/// Emits one sheet per page, each back sheet straight after its front,
/// with a break marker between sheets and none after the last.
pub fn assemble(pages: &[RenderedPage], options: &AssembleOptions) -> PrintDocument {
    let mut sheets: Vec<String> = Vec::with_capacity(pages.len() * 2);

    for page in pages {
        sheets.push(format!(
            r#"<section class="sheet front {}" data-page="{}">{}</section>"#,
            options.layout.css_class(),
            page.number,
            page.front_html
        ));
        if options.double_sided {
            sheets.push(format!(
                r#"<section class="sheet back {}" data-page="{}">{}</section>"#,
                options.layout.css_class(),
                page.number,
                page.back_html
            ));
        }
    }

    let break_count = sheets.len().saturating_sub(1);
    let body = sheets.join(PAGE_BREAK);

    PrintDocument {
        html: wrap_document(&body, options),
        page_count: sheets.len(),
        break_count,
        item_count: pages.iter().map(|p| p.item_count).sum(),
        pending_codes: 0,
    }
}

fn wrap_document(body: &str, options: &AssembleOptions) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
@page {{ size: {size}; margin: 0; }}
.page-break {{ break-after: page; page-break-after: always; }}
.sheet {{ box-sizing: border-box; overflow: hidden; }}
</style>
</head>
<body class="{theme}">
{body}
</body>
</html>
"#,
        title = crate::core::render::escape_html(&options.title),
        size = options.page_size.css_size(),
        theme = options.theme.css_class(),
        body = body
    )
}
