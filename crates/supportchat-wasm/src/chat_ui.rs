use std::cell::RefCell;
use std::rc::Rc;

use supportchat_client::{execute, ChatClient, ChatView, Command, Request};
use supportchat_types::{MessageEntry, DEFAULT_BASE_URL};
use wasm_bindgen::JsValue;
use web_sys::{Document, DocumentReadyState, Element, HtmlInputElement};

use crate::dom;
use crate::http::GlooBackend;
use crate::storage::BrowserStore;

const CHAT_FORM_ID: &str = "chat-form";
const USER_INPUT_ID: &str = "user-input";
const CHAT_BOX_ID: &str = "chat-box";
const CLEAR_BUTTON_ID: &str = "clear-button";
const RESET_BUTTON_ID: &str = "reset-button";
const API_BASE_ATTRIBUTE: &str = "data-api-base";

type WidgetClient = ChatClient<GlooBackend, BrowserStore, DomView>;

/// Transcript rendered into the page's chat box
pub struct DomView {
    document: Document,
    chat_box: Element,
    input: HtmlInputElement,
}

impl DomView {
    fn render_entry(&self, entry: &MessageEntry) -> Result<(), JsValue> {
        let wrapper = dom::create_element_with_class(
            &self.document,
            "div",
            &dom::message_class(entry.sender.as_str()),
        )?;
        let paragraph = self.document.create_element("p")?;
        // Text only; bot replies are never interpreted as markup
        paragraph.set_text_content(Some(&entry.message));
        wrapper.append_child(&paragraph)?;
        self.chat_box.append_child(&wrapper)?;
        dom::scroll_to_bottom(&self.chat_box);
        Ok(())
    }
}

impl ChatView for DomView {
    fn append(&mut self, entry: &MessageEntry) {
        if let Err(e) = self.render_entry(entry) {
            log::error!("Failed to render message: {:?}", e);
        }
    }

    fn clear_transcript(&mut self) {
        dom::clear_element(&self.chat_box);
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

pub struct ChatWidget {
    document: Document,
    client: Rc<RefCell<WidgetClient>>,
}

impl ChatWidget {
    /// Wire the widget into the page and schedule the history load.
    pub fn mount(base_url: Option<String>) -> Result<(), JsValue> {
        let document = crate::document()?;
        let form = dom::get_element_by_id(&document, CHAT_FORM_ID)?;

        let base_url = base_url
            .or_else(|| form.get_attribute(API_BASE_ATTRIBUTE))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        log::info!("Chat backend: {}", base_url);

        let view = DomView {
            document: document.clone(),
            chat_box: dom::get_element_by_id(&document, CHAT_BOX_ID)?,
            input: dom::get_input_by_id(&document, USER_INPUT_ID)?,
        };
        let client = ChatClient::new(
            GlooBackend::new(&base_url),
            BrowserStore::local_or_memory(),
            view,
        );

        let widget = ChatWidget {
            document,
            client: Rc::new(RefCell::new(client)),
        };
        widget.setup_form(&form)?;
        widget.setup_optional_button(CLEAR_BUTTON_ID, |client| client.on_clear())?;
        widget.setup_optional_button(RESET_BUTTON_ID, |client| client.on_reset())?;
        widget.schedule_startup()
    }

    fn setup_form(&self, form: &Element) -> Result<(), JsValue> {
        let client = self.client.clone();
        dom::add_event_listener(form, "submit", move |event| {
            event.prevent_default();
            let text = client.borrow().view().input.value();
            let requests = client.borrow_mut().on_submit(&text);
            spawn_requests(client.clone(), requests);
        })
    }

    fn setup_optional_button<F>(&self, id: &str, handler: F) -> Result<(), JsValue>
    where
        F: Fn(&mut WidgetClient) -> Vec<Request> + 'static,
    {
        let Some(button) = self.document.get_element_by_id(id) else {
            log::debug!("No #{} on page; control disabled", id);
            return Ok(());
        };

        let client = self.client.clone();
        dom::add_event_listener(&button, "click", move |_event| {
            let requests = handler(&mut client.borrow_mut());
            spawn_requests(client.clone(), requests);
        })
    }

    fn schedule_startup(&self) -> Result<(), JsValue> {
        if self.document.ready_state() != DocumentReadyState::Loading {
            start(self.client.clone());
            return Ok(());
        }

        let client = self.client.clone();
        dom::add_event_listener(&self.document, "DOMContentLoaded", move |_event| {
            start(client.clone());
        })
    }
}

fn start(client: Rc<RefCell<WidgetClient>>) {
    let requests = client.borrow_mut().dispatch(Command::Startup);
    spawn_requests(client, requests);
}

/// Run each request on the event loop without holding the client borrow
/// across the await, so later events are handled while calls are pending.
fn spawn_requests(client: Rc<RefCell<WidgetClient>>, requests: Vec<Request>) {
    for request in requests {
        let client = client.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let backend = client.borrow().backend();
            let completion = execute(backend.as_ref(), request).await;
            let follow_up = client.borrow_mut().dispatch(completion);
            spawn_requests(client, follow_up);
        });
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn detached_view() -> DomView {
        let document = crate::document().unwrap();
        let chat_box = document.create_element("div").unwrap();
        let input = document
            .create_element("input")
            .unwrap()
            .dyn_into::<HtmlInputElement>()
            .unwrap();
        DomView {
            document,
            chat_box,
            input,
        }
    }

    #[wasm_bindgen_test]
    fn append_uses_sender_class_and_plain_text() {
        let mut view = detached_view();
        view.append(&MessageEntry::user("hi"));
        view.append(&MessageEntry::bot("<b>bold</b> reply"));

        assert_eq!(view.chat_box.child_element_count(), 2);
        let first = view.chat_box.first_element_child().unwrap();
        assert_eq!(first.class_name(), "message user-message");
        let last = view.chat_box.last_element_child().unwrap();
        assert_eq!(last.class_name(), "message bot-message");
        assert_eq!(last.text_content().as_deref(), Some("<b>bold</b> reply"));
        assert!(last.query_selector("b").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn clear_empties_transcript_and_input() {
        let mut view = detached_view();
        view.append(&MessageEntry::greeting());
        view.input.set_value("draft");

        view.clear_transcript();
        view.clear_input();

        assert_eq!(view.chat_box.child_element_count(), 0);
        assert_eq!(view.input.value(), "");
    }
}
