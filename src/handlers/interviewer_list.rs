use crate::handlers::view::Element;
use crate::models::{Interviewer, InterviewerId};

/// One selectable interviewer. Clicking reports the choice upward and changes nothing itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewerListItem<'a> {
    pub id: InterviewerId,
    pub name: &'a str,
    pub avatar: &'a str,
    pub selected: bool,
}

impl InterviewerListItem<'_> {
    pub fn render(&self) -> Element {
        let mut children = vec![Element::image(self.avatar, self.name)];
        // The name label only shows for the selected interviewer.
        if self.selected {
            children.push(Element::text(self.name));
        }
        Element::group(children)
    }

    pub fn click<F: FnOnce()>(&self, set_interviewer: F) {
        set_interviewer();
    }
}

/// Stateless mapping from interviewers to items; `value` marks at most one as selected.
#[derive(Debug, Clone, Copy)]
pub struct InterviewerList<'a> {
    interviewers: &'a [Interviewer],
    value: Option<InterviewerId>,
}

impl<'a> InterviewerList<'a> {
    pub fn new(interviewers: &'a [Interviewer], value: Option<InterviewerId>) -> Self {
        Self { interviewers, value }
    }

    pub fn items(&self) -> Vec<InterviewerListItem<'a>> {
        self.interviewers
            .iter()
            .map(|interviewer| InterviewerListItem {
                id: interviewer.id,
                name: &interviewer.name,
                avatar: &interviewer.avatar,
                selected: Some(interviewer.id) == self.value,
            })
            .collect()
    }

    pub fn render(&self) -> Element {
        let items = self.items().iter().map(InterviewerListItem::render).collect();
        Element::group(vec![Element::text("Interviewer"), Element::group(items)])
    }

    /// Clicks the item whose avatar alt text is `name`, forwarding its id to `on_change`.
    /// Returns false when no such item is listed.
    pub fn click<F: FnOnce(InterviewerId)>(&self, name: &str, on_change: F) -> bool {
        let Some(item) = self.items().into_iter().find(|item| item.name == name) else {
            return false;
        };
        let id = item.id;
        item.click(move || on_change(id));
        true
    }
}
