//! In-memory projection of the recent teams panel and the team inputs it fills.

use crate::models::TeamEntry;
use maud::{Markup, html};

pub const PANEL_ID: &str = "recentSchedules";

/// The team name / team members inputs of the schedule form.
///
/// `team_members` is `None` when the page has no members input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamForm {
    pub team_name: String,
    pub team_members: Option<String>,
}

impl TeamForm {
    pub fn with_members_input() -> Self {
        Self {
            team_name: String::new(),
            team_members: Some(String::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamBlock {
    pub entry: TeamEntry,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PanelContent {
    Empty,
    Placeholder(String),
    Blocks(Vec<TeamBlock>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentTeamsPanel {
    content: PanelContent,
}

impl Default for RecentTeamsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentTeamsPanel {
    pub fn new() -> Self {
        Self {
            content: PanelContent::Empty,
        }
    }

    pub fn clear(&mut self) {
        self.content = PanelContent::Empty;
    }

    pub fn show_placeholder(&mut self, message: &str) {
        self.content = PanelContent::Placeholder(message.to_string());
    }

    pub fn push_block(&mut self, entry: TeamEntry) {
        let block = TeamBlock {
            entry,
            selected: false,
        };
        match &mut self.content {
            PanelContent::Blocks(blocks) => blocks.push(block),
            content => *content = PanelContent::Blocks(vec![block]),
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.content {
            PanelContent::Placeholder(message) => Some(message),
            _ => None,
        }
    }

    pub fn blocks(&self) -> &[TeamBlock] {
        match &self.content {
            PanelContent::Blocks(blocks) => blocks,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.blocks().iter().position(|block| block.selected)
    }

    /// Handles a click on block `index`: fills the form and makes the block the only selected one.
    ///
    /// Members are written only when the form has a members input and the entry has members.
    /// Returns `false` when there is no such block.
    pub fn activate(&mut self, index: usize, form: &mut TeamForm) -> bool {
        let PanelContent::Blocks(blocks) = &mut self.content else {
            return false;
        };
        let Some(entry) = blocks.get(index).map(|block| block.entry.clone()) else {
            return false;
        };

        form.team_name = entry.team_name;
        if let Some(members) = form.team_members.as_mut() {
            if !entry.team_members.is_empty() {
                *members = entry.team_members;
            }
        }

        for (position, block) in blocks.iter_mut().enumerate() {
            block.selected = position == index;
        }
        true
    }

    pub fn to_markup(&self) -> Markup {
        html! {
            div id=(PANEL_ID) class="recent-teams" {
                @if let Some(message) = self.placeholder() {
                    div.no-schedules-msg { (message) }
                }
                @for block in self.blocks() {
                    div.schedule-block.recent-team.selected[block.selected]
                        title="Click to fill in the team details"
                        data-team-name=(block.entry.team_name)
                        data-team-members=(block.entry.team_members) {
                        div.schedule-team { (block.entry.team_name) }
                    }
                }
            }
        }
    }
}
