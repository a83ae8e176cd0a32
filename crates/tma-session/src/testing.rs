use crate::bridge::{HostBridge, MainButton};
use crate::theme::{ThemeError, ThemeSurface};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tma_api_types::{HostUser, ThemeParams};

pub(crate) fn ada() -> HostUser {
    HostUser {
        id: 42,
        first_name: "Ada".to_owned(),
        last_name: Some("Lovelace".to_owned()),
        username: Some("ada".to_owned()),
        language_code: Some("en".to_owned()),
        is_premium: true,
    }
}

#[derive(Default)]
pub(crate) struct FakeMainButton {
    pub(crate) text: RefCell<String>,
    pub(crate) visible: Cell<bool>,
    handlers: RefCell<Vec<Box<dyn Fn()>>>,
}

impl FakeMainButton {
    pub(crate) fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub(crate) fn click(&self) {
        for handler in self.handlers.borrow().iter() {
            handler();
        }
    }
}

impl MainButton for FakeMainButton {
    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_owned();
    }

    fn show(&self) {
        self.visible.set(true);
    }

    fn on_click(&self, handler: Box<dyn Fn()>) {
        self.handlers.borrow_mut().push(handler);
    }
}

pub(crate) struct FakeBridge {
    init_data: String,
    user: Option<HostUser>,
    theme: ThemeParams,
    button: Option<Rc<FakeMainButton>>,
    pub(crate) calls: RefCell<Vec<&'static str>>,
}

impl FakeBridge {
    pub(crate) fn new(init_data: &str) -> Self {
        Self {
            init_data: init_data.to_owned(),
            user: Some(ada()),
            theme: ThemeParams::default(),
            button: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn without_user(mut self) -> Self {
        self.user = None;
        self
    }

    pub(crate) fn with_theme(mut self, theme: ThemeParams) -> Self {
        self.theme = theme;
        self
    }

    pub(crate) fn with_main_button(mut self, button: Rc<FakeMainButton>) -> Self {
        self.button = Some(button);
        self
    }
}

impl HostBridge for FakeBridge {
    fn init_data(&self) -> String {
        self.init_data.clone()
    }

    fn user(&self) -> Option<HostUser> {
        self.user.clone()
    }

    fn theme_params(&self) -> ThemeParams {
        self.theme.clone()
    }

    fn ready(&self) {
        self.calls.borrow_mut().push("ready");
    }

    fn expand(&self) {
        self.calls.borrow_mut().push("expand");
    }

    fn main_button(&self) -> Option<Rc<dyn MainButton>> {
        self.button
            .clone()
            .map(|button| button as Rc<dyn MainButton>)
    }
}

#[derive(Default)]
pub(crate) struct RecordingSurface {
    props: RefCell<Vec<(String, String)>>,
    fail_on: Option<&'static str>,
}

impl RecordingSurface {
    pub(crate) fn failing_on(property: &'static str) -> Self {
        Self {
            fail_on: Some(property),
            ..Self::default()
        }
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.props.borrow().iter().map(|(name, _)| name.clone()).collect()
    }

    pub(crate) fn get(&self, name: &str) -> Option<String> {
        self.props
            .borrow()
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

impl ThemeSurface for RecordingSurface {
    fn set_property(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        if self.fail_on == Some(name) {
            return Err(ThemeError {
                property: name.to_owned(),
                reason: "style is read-only".to_owned(),
            });
        }
        self.props
            .borrow_mut()
            .push((name.to_owned(), value.to_owned()));
        Ok(())
    }
}
