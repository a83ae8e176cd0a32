//! Theme variables land on `:root` so the stylesheet in `index.html` can
//! read them anywhere.

use tma_session::{ThemeError, ThemeSurface};
use wasm_bindgen::prelude::*;
use web_sys::CssStyleDeclaration;

pub struct DocumentSurface {
    style: CssStyleDeclaration,
}

impl DocumentSurface {
    pub fn root() -> Result<Self, JsValue> {
        let root = crate::dom::document()
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?;
        let root: web_sys::HtmlElement = root.dyn_into()?;
        Ok(Self {
            style: root.style(),
        })
    }
}

impl ThemeSurface for DocumentSurface {
    fn set_property(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        self.style
            .set_property(name, value)
            .map_err(|err| ThemeError {
                property: name.to_owned(),
                reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
            })
    }
}
