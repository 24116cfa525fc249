//! Todo List entry point
//!
//! On the web: builds the page, loads the saved list and wires DOM events to
//! the list store. Natively: runs a short headless walkthrough.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement};

    use todo_list::storage::LocalStorage;
    use todo_list::{ItemId, ListStore, MemoryStorage, Settings, Storage};

    type Store = ListStore<Box<dyn Storage>>;

    const INPUT_ID: &str = "new-item";
    const FORM_ID: &str = "new-item-form";
    const ERROR_ID: &str = "error";
    const LIST_ID: &str = "todo-list";

    /// Open LocalStorage, or keep the list in memory for this session
    fn open_storage() -> Box<dyn Storage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}; changes will not survive a reload", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        // Log everything until settings are known
        console_log::init_with_level(log::Level::Trace).expect("Failed to init logger");

        let storage = open_storage();
        let settings = Settings::load(&storage);
        log::set_max_level(settings.log_level.to_level().to_level_filter());

        log::info!("Todo List starting...");

        let mut store = ListStore::new(storage, settings);
        if store.initialize().is_err() {
            log::info!("Starting with an empty list");
        }
        let store = Rc::new(RefCell::new(store));

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Err(e) = build_page(&document) {
            log::error!("Failed to build page: {:?}", e);
            return;
        }

        setup_form(&document, store.clone());
        setup_list_events(&document, store.clone());
        refresh(&document, &store.borrow());

        log::info!("Todo List running!");
    }

    /// Create the static page skeleton inside `#app` (or `<body>`)
    fn build_page(document: &Document) -> Result<(), JsValue> {
        let root: Element = match document.get_element_by_id("app") {
            Some(el) => el,
            None => document.body().ok_or("no body")?.into(),
        };

        let container = document.create_element("div")?;
        container.set_class_name("App");

        let title = document.create_element("h2")?;
        title.set_text_content(Some("Todo List"));
        container.append_child(&title)?;

        let form = document.create_element("form")?;
        form.set_id(FORM_ID);
        let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        input.set_type("text");
        input.set_id(INPUT_ID);
        input.set_class_name("inputText");
        form.append_child(&input)?;
        let submit: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        submit.set_type("submit");
        submit.set_value("Add");
        submit.set_class_name("submitButton");
        form.append_child(&submit)?;
        container.append_child(&form)?;

        let error = document.create_element("p")?;
        error.set_id(ERROR_ID);
        error.set_class_name("hidden");
        container.append_child(&error)?;

        let list = document.create_element("ul")?;
        list.set_id(LIST_ID);
        list.set_class_name("todoList");
        container.append_child(&list)?;

        root.append_child(&container)?;
        Ok(())
    }

    /// Redraw the error line and the list
    fn refresh(document: &Document, store: &Store) {
        if let Err(e) = render(document, store) {
            log::error!("Render failed: {:?}", e);
        }
    }

    fn render(document: &Document, store: &Store) -> Result<(), JsValue> {
        if let Some(el) = document.get_element_by_id(ERROR_ID) {
            match store.error() {
                Some(message) => {
                    el.set_text_content(Some(message));
                    el.set_class_name("error blink");
                }
                None => {
                    el.set_text_content(None);
                    el.set_class_name("hidden");
                }
            }
        }

        let Some(list) = document.get_element_by_id(LIST_ID) else {
            return Ok(());
        };
        list.set_inner_html("");

        for item in store.items() {
            let li = document.create_element("li")?;

            let text: HtmlInputElement = document.create_element("input")?.dyn_into()?;
            text.set_type("text");
            text.set_class_name("inputText");
            text.set_value(&item.text);
            text.set_disabled(!item.is_editable());
            text.set_attribute("data-action", "edit")?;
            text.set_attribute("data-id", item.id.as_str())?;
            li.append_child(&text)?;

            let check: HtmlInputElement = document.create_element("input")?.dyn_into()?;
            check.set_type("checkbox");
            check.set_checked(item.completed);
            check.set_attribute("data-action", "toggle")?;
            check.set_attribute("data-id", item.id.as_str())?;
            li.append_child(&check)?;

            let delete = document.create_element("button")?;
            delete.set_text_content(Some("Delete"));
            delete.set_attribute("data-action", "delete")?;
            delete.set_attribute("data-id", item.id.as_str())?;
            li.append_child(&delete)?;

            list.append_child(&li)?;
        }
        Ok(())
    }

    fn setup_form(document: &Document, store: Rc<RefCell<Store>>) {
        let Some(input) = document
            .get_element_by_id(INPUT_ID)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        // Keep the draft in sync with the text box
        {
            let store = store.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                store.borrow_mut().set_draft(input_clone.value());
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(form) = document.get_element_by_id(FORM_ID) {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                let mut s = store.borrow_mut();
                match s.submit() {
                    Ok(id) => {
                        input.set_value("");
                        log::debug!("Added item {}", id);
                    }
                    Err(e) => log::debug!("Rejected add: {}", e),
                }
                refresh(&document, &s);
            });
            let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Read `data-action` / `data-id` from an event target
    fn target_action(event: &web_sys::Event) -> Option<(String, ItemId, Element)> {
        let el: Element = event.target()?.dyn_into().ok()?;
        let action = el.get_attribute("data-action")?;
        let id = el.get_attribute("data-id")?;
        Some((action, ItemId::from(id), el))
    }

    /// One delegated listener per event type on the list
    fn setup_list_events(document: &Document, store: Rc<RefCell<Store>>) {
        let Some(list) = document.get_element_by_id(LIST_ID) else {
            return;
        };

        // Text edits: no redraw, the input already shows the new value
        {
            let store = store.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if let Some((action, id, el)) = target_action(&event) {
                    if action == "edit" {
                        if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                            store.borrow_mut().edit(&id, input.value());
                        }
                    }
                }
            });
            let _ = list.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Checkbox toggles
        {
            let store = store.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if let Some((action, id, _)) = target_action(&event) {
                    if action == "toggle" {
                        let mut s = store.borrow_mut();
                        s.toggle(&id);
                        refresh(&document, &s);
                    }
                }
            });
            let _ = list.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Delete buttons
        {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if let Some((action, id, _)) = target_action(&event) {
                    if action == "delete" {
                        let mut s = store.borrow_mut();
                        s.delete(&id);
                        refresh(&document, &s);
                    }
                }
            });
            let _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Todo List (native) starting...");
    log::info!("Native mode keeps the list in memory - run with `trunk serve` for the web version");

    walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn walkthrough() {
    use todo_list::{ListStore, MemoryStorage, Settings, Storage};

    let mut storage = MemoryStorage::new();
    let settings = Settings::load(&storage);
    let key = settings.storage_key.clone();

    {
        let mut store = ListStore::new(&mut storage, settings);
        if store.initialize().is_err() {
            log::info!("Starting with an empty list");
        }

        if let Err(e) = store.add("   ") {
            println!("rejected: {} ({})", e, store.error().unwrap_or_default());
        }
        let milk = store.add("buy milk");
        let dog = store.add("walk dog");
        if let (Ok(milk), Ok(dog)) = (milk, dog) {
            store.toggle(&milk);
            store.delete(&dog);
        }

        for item in store.items() {
            let mark = if item.completed { "x" } else { " " };
            println!("[{}] {}", mark, item.text);
        }
    }

    match storage.get_item(&key) {
        Ok(Some(json)) => println!("saved under `{}`: {}", key, json),
        _ => println!("nothing saved"),
    }
}
