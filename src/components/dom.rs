//! Browser-side effects the views cannot express as markup. The functions
//! live in `public/folio.js` under `window.folio`; outside the browser they
//! do nothing.

#[cfg(feature = "hydrate")]
mod bindings {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = folio, js_name = scrollToCurrentMatch)]
        pub fn scroll_to_current_match();

        #[wasm_bindgen(js_namespace = folio, js_name = scrollToHeading)]
        pub fn scroll_to_heading(id: &str);

        #[wasm_bindgen(js_namespace = folio, js_name = setFullscreen)]
        pub fn set_fullscreen(on: bool);

        #[wasm_bindgen(js_namespace = folio, js_name = isFullscreen)]
        pub fn is_fullscreen() -> bool;

        /// Run mermaid and MathJax over freshly inserted content.
        #[wasm_bindgen(js_namespace = folio, js_name = renderExtras)]
        pub fn render_extras(mermaid_theme: &str);

        #[wasm_bindgen(js_namespace = folio, js_name = focusSearch)]
        pub fn focus_search();

        /// Whether a text field has focus, so plain-key shortcuts stay out
        /// of the reader's typing.
        #[wasm_bindgen(js_namespace = folio, js_name = isEditing)]
        pub fn is_editing() -> bool;
    }
}

#[cfg(feature = "hydrate")]
pub use bindings::*;

#[cfg(not(feature = "hydrate"))]
mod inert {
    pub fn scroll_to_current_match() {}

    pub fn scroll_to_heading(_id: &str) {}

    pub fn set_fullscreen(_on: bool) {}

    pub fn is_fullscreen() -> bool {
        false
    }

    pub fn render_extras(_mermaid_theme: &str) {}

    pub fn focus_search() {}

    pub fn is_editing() -> bool {
        false
    }
}

#[cfg(not(feature = "hydrate"))]
pub use inert::*;

#[cfg(test)]
mod tests {
    const SCRIPT: &str = include_str!("../../public/folio.js");

    #[test]
    fn test_script_defines_every_binding() {
        for name in [
            "scrollToCurrentMatch",
            "scrollToHeading",
            "setFullscreen",
            "isFullscreen",
            "renderExtras",
            "focusSearch",
            "isEditing",
        ] {
            assert!(SCRIPT.contains(&format!("{name}(")), "{name}");
        }
    }

    #[test]
    fn test_math_typesetting_supports_every_mathjax_entry_point() {
        assert!(SCRIPT.contains("MathJax.startup.promise"));
        assert!(SCRIPT.contains("MathJax.typesetPromise()"));
        assert!(SCRIPT.contains("MathJax.typeset()"));
    }
}
