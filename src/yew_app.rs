use std::rc::Rc;

use web_sys::{Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, InputEvent, MouseEvent};
use yew::prelude::*;

use crate::app_config;
use crate::app_core::{build_app_core, start_catalog_load, AppCore};

const FAMILY_PLACEHOLDER: &str = "Select Font Family";
const WEIGHT_PLACEHOLDER: &str = "Select Font Weight";
const TEXT_PLACEHOLDER: &str = "Type Here";
const SAVED_MESSAGE: &str = "saved!";
const RESET_MESSAGE: &str = "reset";

#[derive(Properties)]
struct EditorProps {
    core: Rc<AppCore>,
    catalog_url: AttrValue,
}

impl PartialEq for EditorProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core) && self.catalog_url == other.catalog_url
    }
}

#[function_component(App)]
pub(crate) fn app() -> Html {
    let config = use_memo((), |_| app_config::editor_config());
    let core = {
        let config = config.clone();
        use_memo((), move |_| build_app_core(&config))
    };
    match core.as_ref() {
        Some(core) => html! {
            <Editor core={core.clone()} catalog_url={AttrValue::from(config.catalog_url.clone())} />
        },
        None => html! {
            <p class="editor-error">{ "Font preview needs a browser document." }</p>
        },
    }
}

#[function_component(Editor)]
fn editor(props: &EditorProps) -> Html {
    let core = props.core.clone();
    let snapshot = use_state(|| core.snapshot());
    let family_select = use_node_ref();
    let weight_select = use_node_ref();

    {
        let core = core.clone();
        let snapshot = snapshot.clone();
        let catalog_url = props.catalog_url.clone();
        use_effect_with((), move |_| {
            let core_for_cb = core.clone();
            let subscription = core.subscribe(Rc::new(move || {
                snapshot.set(core_for_cb.snapshot());
            }));
            start_catalog_load(&core, catalog_url.to_string());
            move || {
                drop(subscription);
                core.release_style();
            }
        });
    }

    {
        let family_select = family_select.clone();
        let weight_select = weight_select.clone();
        use_effect_with((*snapshot).clone(), move |snapshot| {
            let selection = &snapshot.selection;
            if let Some(select) = family_select.cast::<HtmlSelectElement>() {
                select.set_value(&selection.family);
            }
            if let Some(select) = weight_select.cast::<HtmlSelectElement>() {
                select.set_value(&selection.weight);
            }
        });
    }

    let on_family_change = {
        let core = core.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            core.set_family(&select.value());
        })
    };
    let on_weight_change = {
        let core = core.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            core.set_weight(&select.value());
        })
    };
    let on_italic_change = {
        let core = core.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            core.set_italic(input.checked());
        })
    };
    let on_text_input = {
        let core = core.clone();
        Callback::from(move |event: InputEvent| {
            let area: HtmlTextAreaElement = event.target_unchecked_into();
            core.set_text(&area.value());
        })
    };
    let on_save = {
        let core = core.clone();
        Callback::from(move |_: MouseEvent| match core.save() {
            Ok(()) => gloo::dialogs::alert(SAVED_MESSAGE),
            Err(err) => gloo::console::error!("storage: save failed", err.to_string()),
        })
    };
    let on_reset = {
        let core = core.clone();
        Callback::from(move |_: MouseEvent| match core.reset() {
            Ok(()) => gloo::dialogs::alert(RESET_MESSAGE),
            Err(err) => gloo::console::error!("storage: reset failed", err.to_string()),
        })
    };

    let selection = &snapshot.selection;
    let no_family = selection.family.is_empty();
    let family_options = snapshot.families.iter().map(|family| {
        html! {
            <option key={family.clone()} value={family.clone()}>{ family.clone() }</option>
        }
    });
    let weight_options = snapshot.weight_options.iter().map(|option| {
        html! {
            <option key={format!("{}/{}", selection.family, option.value)} value={option.value.clone()}>
                { option.label.clone() }
            </option>
        }
    });

    html! {
        <div class="editor-container">
            <div class="controls">
                <select ref={family_select} onchange={on_family_change}>
                    <option value="">{ FAMILY_PLACEHOLDER }</option>
                    { for family_options }
                </select>
                <select ref={weight_select} onchange={on_weight_change} disabled={no_family}>
                    <option value="">{ WEIGHT_PLACEHOLDER }</option>
                    { for weight_options }
                </select>
                <label>
                    { "Italic:" }
                    <input
                        type="checkbox"
                        checked={selection.italic}
                        onchange={on_italic_change}
                        disabled={no_family}
                    />
                </label>
            </div>
            <textarea
                style={snapshot.preview.to_css()}
                value={selection.text.clone()}
                oninput={on_text_input}
                placeholder={TEXT_PLACEHOLDER}
            />
            <button onclick={on_save}>{ "Save" }</button>
            <button onclick={on_reset}>{ "Reset" }</button>
        </div>
    }
}
