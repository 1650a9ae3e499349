//! Client-side script appended to every page that embeds a viewer.
//!
//! - `update_swagger_ui_iframe_height(id)` is called by the embedded document
//!   whenever its body resizes.
//! - A scroll listener forwards the frame offset to `update_top_val` so modals
//!   inside the frame follow the outer page.
//! - With Material for MkDocs, the palette attribute on `<body>` is mirrored
//!   into every frame. Material replaces pages without reloading, so the whole
//!   script then runs from `document$.subscribe`.

use crate::config::SiteConfig;

/// Extra height (px) added to the measured frame content.
pub const FRAME_PADDING: u32 = 80;

/// Class shared by every viewer frame.
pub const FRAME_CLASS: &str = "swagger-ui-iframe";

const RESIZE_SCRIPT: &str = r#"
window.update_swagger_ui_iframe_height = function (id) {
    var iFrameID = document.getElementById(id);
    if (iFrameID) {
        var full_height = (iFrameID.contentWindow.document.body.scrollHeight + __PADDING__) + "px";
        iFrameID.height = full_height;
        iFrameID.style.height = full_height;
    }
}
"#;

const SCROLL_SCRIPT: &str = r#"
let iframe_id_list = []
var iframes = document.getElementsByClassName("__CLASS__");
for (var i = 0; i < iframes.length; i++) {
    iframe_id_list.push(iframes[i].getAttribute("id"))
}
let ticking = false;
document.addEventListener('scroll', function (e) {
    if (!ticking) {
        window.requestAnimationFrame(() => {
            let half_vh = window.innerHeight / 2;
            for (var i = 0; i < iframe_id_list.length; i++) {
                let element = document.getElementById(iframe_id_list[i])
                if (element == null) {
                    return
                }
                let diff = element.getBoundingClientRect().top
                if (element.contentWindow.update_top_val) {
                    element.contentWindow.update_top_val(half_vh - diff)
                }
            }
            ticking = false;
        });
        ticking = true;
    }
});
"#;

const DARK_MODE_SCRIPT: &str = r#"
const schemeAttr = document.body.getAttribute("data-md-color-scheme");
const isMediaPrefersScheme = document.body.getAttribute("data-md-color-media") === "(prefers-color-scheme: dark)";

if (!isMediaPrefersScheme) {
    window.__init_is_dark_mode = (schemeAttr === dark_scheme_name);
} else {
    const computedScheme = window.getComputedStyle(document.body).getPropertyValue('color-scheme');
    window.__init_is_dark_mode = computedScheme === "dark";
}
const options = {
    attributeFilter: ['data-md-color-scheme'],
};
function color_scheme_callback(mutations) {
    for (let mutation of mutations) {
        if (mutation.attributeName === "data-md-color-scheme") {
            let scheme = document.body.getAttribute("data-md-color-scheme")
            var iframe_list = document.getElementsByClassName("__CLASS__")
            for (var i = 0; i < iframe_list.length; i++) {
                var ele = iframe_list.item(i);
                if (ele) {
                    if (scheme === dark_scheme_name) {
                        ele.contentWindow.enable_dark_mode();
                    } else {
                        ele.contentWindow.disable_dark_mode();
                    }
                }
            }
        }
    }
}
const observer = new MutationObserver(color_scheme_callback);
observer.observe(document.body, options);
"#;

/// Build the page-level script for `config`.
pub fn page_script(config: &SiteConfig) -> String {
    let mut code = RESIZE_SCRIPT.replace("__PADDING__", &FRAME_PADDING.to_string());
    code.push_str(&SCROLL_SCRIPT.replace("__CLASS__", FRAME_CLASS));

    if !config.has_dark_mode_theme() {
        return code;
    }

    // serde_json quoting keeps a user supplied name a valid JS string literal
    let scheme = serde_json::Value::from(config.swagger_ui.dark_scheme_name.as_str());
    code.push_str(&format!("\nconst dark_scheme_name = {scheme}\n"));
    code.push_str(&DARK_MODE_SCRIPT.replace("__CLASS__", FRAME_CLASS));

    format!("document$.subscribe(() => {{{code}}})")
}
