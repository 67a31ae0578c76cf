use stat_card::{CharacterForm, InputSource};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Node refs for every form input. Values are pulled on demand through
/// [`InputSource`], so the page never mirrors field text into state.
#[derive(Clone, PartialEq, Default)]
pub struct FormRefs {
    pub stats: [NodeRef; 5],
    pub name: NodeRef,
    pub ability: NodeRef,
    pub level: NodeRef,
    pub color: NodeRef,
}

fn value_of(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

impl InputSource for FormRefs {
    fn read(&self) -> CharacterForm {
        CharacterForm {
            stats: self.stats.each_ref().map(value_of),
            name: value_of(&self.name),
            ability: value_of(&self.ability),
            level: value_of(&self.level),
            color: value_of(&self.color),
        }
    }
}

/// Stable set of form refs for the lifetime of the component.
#[hook]
pub fn use_form_refs() -> FormRefs {
    let refs = use_state(FormRefs::default);
    (*refs).clone()
}
