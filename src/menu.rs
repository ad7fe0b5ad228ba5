// Mobile navigation menu: a two state machine plus the DOM side effects
// that mirror the state onto the toggle button and the menu container.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, MouseEvent, Node};

pub const TOGGLE_SELECTOR: &str = ".nav-toggle";
pub const MENU_SELECTOR: &str = ".nav-center";
pub const OPEN_CLASS: &str = "open";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    ToggleActivated,
    LinkActivated,
    OutsideClick,
    Escape,
}

impl MenuState {
    pub fn next(self, event: MenuEvent) -> MenuState {
        match (self, event) {
            (MenuState::Closed, MenuEvent::ToggleActivated) => MenuState::Open,
            _ => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    pub fn aria_expanded(self) -> &'static str {
        match self {
            MenuState::Open => "true",
            MenuState::Closed => "false",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            MenuState::Open => "\u{2715}",
            MenuState::Closed => "\u{2630}",
        }
    }
}

impl Default for MenuState {
    fn default() -> Self {
        MenuState::Closed
    }
}

#[derive(Clone)]
pub struct NavMenu {
    toggle: Element,
    menu: Element,
    state: Rc<Cell<MenuState>>,
}

impl NavMenu {
    pub fn find(document: &Document) -> Result<Option<NavMenu>, JsValue> {
        let toggle = document.query_selector(TOGGLE_SELECTOR)?;
        let menu = document.query_selector(MENU_SELECTOR)?;
        Ok(match (toggle, menu) {
            (Some(toggle), Some(menu)) => Some(NavMenu {
                toggle,
                menu,
                state: Rc::new(Cell::new(MenuState::Closed)),
            }),
            _ => None,
        })
    }

    pub fn state(&self) -> MenuState {
        self.state.get()
    }

    pub fn handle(&self, event: MenuEvent) -> Result<(), JsValue> {
        let next = self.state.get().next(event);
        self.state.set(next);
        self.apply(next)
    }

    fn apply(&self, state: MenuState) -> Result<(), JsValue> {
        let classes = self.menu.class_list();
        if state.is_open() {
            classes.add_1(OPEN_CLASS)?;
        } else {
            classes.remove_1(OPEN_CLASS)?;
        }
        self.toggle
            .set_attribute("aria-expanded", state.aria_expanded())?;
        self.toggle.set_text_content(Some(state.glyph()));
        Ok(())
    }

    fn contains_target(&self, event: &web_sys::Event) -> bool {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let target = target.as_ref();
        self.menu.contains(target) || self.toggle.contains(target)
    }

    // Wires the toggle, in-menu links, outside clicks and Escape.
    // Listeners live as long as the page.
    pub fn bind(self, document: &Document) -> Result<(), JsValue> {
        {
            let nav = self.clone();
            let on_toggle = Closure::wrap(Box::new(move |_: MouseEvent| {
                report(nav.handle(MenuEvent::ToggleActivated));
            }) as Box<dyn FnMut(_)>);
            self.toggle
                .add_event_listener_with_callback("click", on_toggle.as_ref().unchecked_ref())?;
            on_toggle.forget();
        }

        {
            let nav = self.clone();
            let on_link = Closure::wrap(Box::new(move |_: MouseEvent| {
                report(nav.handle(MenuEvent::LinkActivated));
            }) as Box<dyn FnMut(_)>);
            let links = self.menu.query_selector_all("a")?;
            for i in 0..links.length() {
                if let Some(link) = links.item(i) {
                    link.add_event_listener_with_callback("click", on_link.as_ref().unchecked_ref())?;
                }
            }
            on_link.forget();
        }

        {
            let nav = self.clone();
            let on_document_click = Closure::wrap(Box::new(move |event: MouseEvent| {
                if !nav.contains_target(&event) {
                    report(nav.handle(MenuEvent::OutsideClick));
                }
            }) as Box<dyn FnMut(_)>);
            document.add_event_listener_with_callback(
                "click",
                on_document_click.as_ref().unchecked_ref(),
            )?;
            on_document_click.forget();
        }

        {
            let nav = self;
            let on_keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if event.key() == "Escape" {
                    report(nav.handle(MenuEvent::Escape));
                }
            }) as Box<dyn FnMut(_)>);
            document
                .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
            on_keydown.forget();
        }

        Ok(())
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(e) = result {
        console_warn!("menu: failed to update: {:?}", e);
    }
}
