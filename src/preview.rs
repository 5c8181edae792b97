use std::path::{Path, PathBuf};

use crate::config::AnimationConfig;

const LOTTIE_WEB_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/lottie-web/5.12.2/lottie.min.js";

/// HTML page that plays `document_file_name` (resolved relative to the page)
/// on a loop with lottie-web.
pub fn render_preview_html(document_file_name: &str, config: &AnimationConfig) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <title>Architecture Diagram Preview</title>\n");
    html.push_str(&format!("    <script src=\"{LOTTIE_WEB_URL}\"></script>\n"));
    html.push_str("    <style>\n");
    html.push_str(
        "        body {\n            display: flex;\n            justify-content: center;\n            align-items: center;\n            min-height: 100vh;\n            margin: 0;\n            background: #1a1a1a;\n        }\n",
    );
    html.push_str(&format!(
        "        #lottie-container {{\n            width: {}px;\n            height: {}px;\n            background: #2B2B2B;\n            border-radius: 10px;\n            border: 2px solid #4ECDC4;\n        }}\n",
        config.width, config.height
    ));
    html.push_str("    </style>\n</head>\n<body>\n");
    html.push_str("    <div id=\"lottie-container\"></div>\n");
    html.push_str("    <script>\n");
    html.push_str(&format!(
        "        lottie.loadAnimation({{\n            container: document.getElementById('lottie-container'),\n            renderer: 'svg',\n            loop: true,\n            autoplay: true,\n            path: '{}'\n        }});\n",
        escape_js_string(document_file_name)
    ));
    html.push_str("    </script>\n</body>\n</html>\n");
    html
}

/// `preview-<stem>.html` next to the document.
pub fn preview_path(document_path: &Path) -> PathBuf {
    let stem = document_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "diagram".to_string());
    document_path.with_file_name(format!("preview-{stem}.html"))
}

fn escape_js_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('<', "\\x3c")
}
