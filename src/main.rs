//! Multi List Todo entry point
//!
//! In the browser: starts a session over local/session storage, renders the
//! lists into the page and routes user events to the store.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent};

    use multi_list_todo::store::StoreResult;
    use multi_list_todo::{Settings, TodoList, TodoSession};

    type App = Rc<RefCell<TodoSession>>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let settings = Settings::default();
        console_log::init_with_level(settings.log_level.to_level())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Multi List Todo starting...");

        let app: App = Rc::new(RefCell::new(TodoSession::with_platform_backends(&settings)));
        let root = root(&document()?)?;

        install_handlers(&app, &root)?;
        render(&app)?;

        log::info!("Multi List Todo running!");
        Ok(())
    }

    fn document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    /// `#app` if the page has one, otherwise `<body>`
    fn root(document: &Document) -> Result<Element, JsValue> {
        if let Some(el) = document.get_element_by_id("app") {
            return Ok(el);
        }
        document
            .body()
            .map(Element::from)
            .ok_or_else(|| JsValue::from_str("no body"))
    }

    /// One delegated listener per event type on the root. Elements carry
    /// `data-action` plus `data-list`/`data-item` positions.
    fn install_handlers(app: &App, root: &Element) -> Result<(), JsValue> {
        for kind in ["click", "change", "input", "keydown"] {
            let app = Rc::clone(app);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                if let Err(e) = handle(&app, &event) {
                    log::error!("UI update failed: {:?}", e);
                }
            });
            root.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn handle(app: &App, event: &Event) -> Result<(), JsValue> {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return Ok(());
        };
        let Some(action) = target.get_attribute("data-action") else {
            return Ok(());
        };
        let list = index_attr(&target, "data-list");
        let item = index_attr(&target, "data-item");
        let enter = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|k| k.key() == "Enter");

        let changed = {
            let mut session = app.borrow_mut();
            let store = session.store_mut();
            match (event.type_().as_str(), action.as_str(), list, item) {
                // Typing: update state but keep the DOM (and focus) as is
                ("input", "list-name", _, _) => {
                    store.set_new_list_name(input_value(&target));
                    false
                }
                ("input", "item-draft", Some(l), _) => {
                    applied(store.update_draft_item_text(l, input_value(&target)));
                    false
                }
                ("keydown", "list-name", _, _) if enter => store.submit_new_list().is_some(),
                ("click", "add-list", _, _) => store.submit_new_list().is_some(),
                ("keydown", "item-draft", Some(l), _) if enter => added(store.add_item(l)),
                ("click", "add-item", Some(l), _) => added(store.add_item(l)),
                ("click", "delete-list", Some(l), _) => applied(store.delete_list(l)),
                ("click", "delete-item", Some(l), Some(i)) => applied(store.delete_item(l, i)),
                ("change", "toggle-item", Some(l), Some(i)) => {
                    applied(store.toggle_item_completion(l, i))
                }
                _ => false,
            }
        };

        if changed {
            render(app)?;
            if enter {
                refocus(&action, list)?;
            }
        }
        Ok(())
    }

    fn index_attr(el: &Element, name: &str) -> Option<usize> {
        el.get_attribute(name)?.parse().ok()
    }

    fn input_value(el: &Element) -> String {
        el.dyn_ref::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn applied<T>(result: StoreResult<T>) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Ignoring stale UI action: {}", e);
                false
            }
        }
    }

    fn added<T>(result: StoreResult<Option<T>>) -> bool {
        match result {
            Ok(snapshot) => snapshot.is_some(),
            Err(e) => {
                log::warn!("Ignoring stale UI action: {}", e);
                false
            }
        }
    }

    /// Put the cursor back into the field Enter was pressed in
    fn refocus(action: &str, list: Option<usize>) -> Result<(), JsValue> {
        let selector = match list {
            Some(l) => format!("[data-action=\"{}\"][data-list=\"{}\"]", action, l),
            None => format!("[data-action=\"{}\"]", action),
        };
        if let Some(el) = document()?.query_selector(&selector)? {
            if let Some(el) = el.dyn_ref::<HtmlElement>() {
                el.focus()?;
            }
        }
        Ok(())
    }

    fn render(app: &App) -> Result<(), JsValue> {
        let document = document()?;
        let root = root(&document)?;
        let session = app.borrow();
        let store = session.store();

        root.set_inner_html("");

        let header = element(&document, "div", "add-list-container")?;
        let name_input = text_input(&document, "add-list-input", "New list name", "list-name")?;
        name_input.set_value(store.new_list_name());
        header.append_child(&name_input)?;
        header.append_child(&button(&document, "Add List", "add-list-button", "add-list")?)?;
        root.append_child(&header)?;

        let grid = element(&document, "div", "todo-grid")?;
        for (index, list) in store.lists().iter().enumerate() {
            grid.append_child(&render_list(&document, index, list)?)?;
        }
        root.append_child(&grid)?;
        Ok(())
    }

    fn render_list(document: &Document, index: usize, list: &TodoList) -> Result<Element, JsValue> {
        let card = element(document, "div", "todo-card")?;
        let position = index.to_string();

        let title_row = element(document, "div", "todo-card-header")?;
        let title = element(document, "h3", "todo-card-title")?;
        title.set_text_content(Some(&list.name));
        title_row.append_child(&title)?;
        let delete = button(document, "×", "todo-delete-list", "delete-list")?;
        delete.set_attribute("data-list", &position)?;
        delete.set_attribute("title", "Delete this list")?;
        title_row.append_child(&delete)?;
        card.append_child(&title_row)?;

        let entry = element(document, "div", "todo-entry")?;
        let draft = text_input(document, "todo-input", "New item", "item-draft")?;
        draft.set_value(&list.draft_item_text);
        draft.set_attribute("data-list", &position)?;
        entry.append_child(&draft)?;
        let add = button(document, "Add", "todo-button", "add-item")?;
        add.set_attribute("data-list", &position)?;
        entry.append_child(&add)?;
        card.append_child(&entry)?;

        let items = element(document, "ul", "todo-items")?;
        for (item_index, item) in list.items.iter().enumerate() {
            let item_position = item_index.to_string();
            let row = element(
                document,
                "li",
                if item.completed { "todo-item completed" } else { "todo-item" },
            )?;

            let checkbox: HtmlInputElement = document.create_element("input")?.dyn_into()?;
            checkbox.set_type("checkbox");
            checkbox.set_class_name("todo-checkbox");
            checkbox.set_checked(item.completed);
            checkbox.set_attribute("data-action", "toggle-item")?;
            checkbox.set_attribute("data-list", &position)?;
            checkbox.set_attribute("data-item", &item_position)?;
            row.append_child(&checkbox)?;

            let text = element(document, "span", "todo-text")?;
            text.set_text_content(Some(&item.text));
            row.append_child(&text)?;

            let remove = button(document, "×", "todo-delete-item", "delete-item")?;
            remove.set_attribute("data-list", &position)?;
            remove.set_attribute("data-item", &item_position)?;
            remove.set_attribute("title", "Delete this item")?;
            row.append_child(&remove)?;

            items.append_child(&row)?;
        }
        card.append_child(&items)?;

        Ok(card)
    }

    fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
        let el = document.create_element(tag)?;
        el.set_class_name(class);
        Ok(el)
    }

    fn button(document: &Document, label: &str, class: &str, action: &str) -> Result<Element, JsValue> {
        let el = element(document, "button", class)?;
        el.set_text_content(Some(label));
        el.set_attribute("data-action", action)?;
        Ok(el)
    }

    fn text_input(
        document: &Document,
        class: &str,
        placeholder: &str,
        action: &str,
    ) -> Result<HtmlInputElement, JsValue> {
        let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        input.set_type("text");
        input.set_class_name(class);
        input.set_placeholder(placeholder);
        input.set_attribute("data-action", action)?;
        Ok(input)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use multi_list_todo::{Settings, TodoSession};

    let settings = Settings::from_env();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str().to_lowercase()),
    )
    .init();
    log::info!("Multi List Todo (native) starting...");
    log::info!("Native mode keeps lists in memory only - build for wasm32 for the browser version");

    let mut session = TodoSession::with_platform_backends(&settings);
    let store = session.store_mut();
    store.set_new_list_name("Groceries");
    store.submit_new_list();
    for text in ["milk", "eggs", "bread"] {
        if let Err(e) = store.update_draft_item_text(0, text).and_then(|_| store.add_item(0)) {
            log::error!("Demo step failed: {}", e);
        }
    }
    if let Err(e) = store.toggle_item_completion(0, 1) {
        log::error!("Demo step failed: {}", e);
    }

    for list in session.store().lists() {
        println!("{} ({}/{} done)", list.name, list.completed_count(), list.items.len());
        for item in &list.items {
            println!("  [{}] {}", if item.completed { "x" } else { " " }, item.text);
        }
    }
    log::info!("Last save: {:?}", session.last_save());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
