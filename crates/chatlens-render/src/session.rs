//! Per-slot ownership of live chart resources.
//!
//! Each dashboard slot holds at most one resource. Replacing a slot releases the old resource
//! before the new one is created, so two renders never overlap on the same surface.

use chatlens_core::{AnalyticsResults, UserSelection};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A chart or canvas handle owned by a slot.
pub trait RenderResource {
    fn release(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartSlot {
    Activity,
    TopUsersPie,
    TopUsersTable,
    EmojiPie,
    WordCloud,
    DailyTimeline,
    MonthlyTimeline,
    HourlyTimeline,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 8] = [
        ChartSlot::Activity,
        ChartSlot::TopUsersPie,
        ChartSlot::TopUsersTable,
        ChartSlot::EmojiPie,
        ChartSlot::WordCloud,
        ChartSlot::DailyTimeline,
        ChartSlot::MonthlyTimeline,
        ChartSlot::HourlyTimeline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::TopUsersPie => "topUsersPie",
            Self::TopUsersTable => "topUsersTable",
            Self::EmojiPie => "emojiPie",
            Self::WordCloud => "wordCloud",
            Self::DailyTimeline => "dailyTimeline",
            Self::MonthlyTimeline => "monthlyTimeline",
            Self::HourlyTimeline => "hourlyTimeline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotAction {
    Render,
    Clear,
}

/// What a payload does to each slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPlan {
    actions: IndexMap<ChartSlot, SlotAction>,
}

impl RenderPlan {
    pub fn for_results(results: &AnalyticsResults, selection: &UserSelection) -> Self {
        let when = |cond: bool| {
            if cond {
                SlotAction::Render
            } else {
                SlotAction::Clear
            }
        };
        // Busiest-user breakdowns only make sense across every participant.
        let show_top_users = selection.is_overall() && results.has_top_users();

        let mut actions = IndexMap::new();
        for slot in ChartSlot::ALL {
            let action = match slot {
                ChartSlot::Activity => SlotAction::Render,
                ChartSlot::TopUsersPie | ChartSlot::TopUsersTable => when(show_top_users),
                ChartSlot::EmojiPie => when(!results.emoji.is_empty()),
                ChartSlot::WordCloud => when(!results.word_cloud.is_empty()),
                ChartSlot::DailyTimeline => when(!results.daily_timeline.is_empty()),
                ChartSlot::MonthlyTimeline => when(!results.monthly_timeline.is_empty()),
                ChartSlot::HourlyTimeline => when(!results.hourly_activity.is_empty()),
            };
            actions.insert(slot, action);
        }
        Self { actions }
    }

    pub fn action(&self, slot: ChartSlot) -> SlotAction {
        self.actions
            .get(&slot)
            .copied()
            .unwrap_or(SlotAction::Clear)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChartSlot, SlotAction)> + '_ {
        self.actions.iter().map(|(s, a)| (*s, *a))
    }

    pub fn slots_to_render(&self) -> impl Iterator<Item = ChartSlot> + '_ {
        self.iter()
            .filter(|(_, a)| *a == SlotAction::Render)
            .map(|(s, _)| s)
    }
}

pub struct VisualizationSession<R: RenderResource> {
    slots: IndexMap<ChartSlot, R>,
}

impl<R: RenderResource> Default for VisualizationSession<R> {
    fn default() -> Self {
        Self {
            slots: IndexMap::new(),
        }
    }
}

impl<R: RenderResource> VisualizationSession<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases whatever `slot` holds, then stores the resource built by `make`.
    pub fn replace(&mut self, slot: ChartSlot, make: impl FnOnce() -> R) -> &mut R {
        self.release_slot(slot);
        let resource = make();
        self.slots.entry(slot).or_insert(resource)
    }

    /// Like [`Self::replace`], for fallible construction. On error the slot stays empty.
    pub fn try_replace<E>(
        &mut self,
        slot: ChartSlot,
        make: impl FnOnce() -> Result<R, E>,
    ) -> Result<&mut R, E> {
        self.release_slot(slot);
        let resource = make()?;
        Ok(self.slots.entry(slot).or_insert(resource))
    }

    /// Returns whether the slot held a resource.
    pub fn clear(&mut self, slot: ChartSlot) -> bool {
        self.release_slot(slot)
    }

    pub fn clear_all(&mut self) {
        while let Some((slot, mut resource)) = self.slots.pop() {
            tracing::debug!(slot = slot.as_str(), "releasing chart resource");
            resource.release();
        }
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&R> {
        self.slots.get(&slot)
    }

    pub fn get_mut(&mut self, slot: ChartSlot) -> Option<&mut R> {
        self.slots.get_mut(&slot)
    }

    pub fn is_active(&self, slot: ChartSlot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn active_slots(&self) -> impl Iterator<Item = ChartSlot> + '_ {
        self.slots.keys().copied()
    }

    /// Walks the plan in slot order, replacing rendered slots and clearing the rest.
    pub fn apply(&mut self, plan: &RenderPlan, mut make: impl FnMut(ChartSlot) -> R) {
        for (slot, action) in plan.iter() {
            match action {
                SlotAction::Render => {
                    self.replace(slot, || make(slot));
                }
                SlotAction::Clear => {
                    self.clear(slot);
                }
            }
        }
    }

    fn release_slot(&mut self, slot: ChartSlot) -> bool {
        match self.slots.shift_remove(&slot) {
            Some(mut old) => {
                tracing::debug!(slot = slot.as_str(), "releasing chart resource");
                old.release();
                true
            }
            None => false,
        }
    }
}

impl<R: RenderResource> Drop for VisualizationSession<R> {
    fn drop(&mut self) {
        self.clear_all();
    }
}

#[cfg(test)]
mod tests;
