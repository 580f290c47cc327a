//! crates/remed_lakay_core/src/navigation.rs
//!
//! The navigation state machine: which tab is active, which detail view (if any)
//! is drilled into, and the listing search query.
//!
//! Detail views never stack. `Detail` is a single optional variant, so a plant
//! detail and a disease detail can never be open at the same time.

/// The five top-level sections reachable from the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Home,
    Diseases,
    Plants,
    Chat,
    Profile,
}

impl Tab {
    /// Header title shown above the tab's content.
    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Remèd Lakay",
            Tab::Diseases => "Maladi yo",
            Tab::Plants => "Plant Medisinal",
            Tab::Chat => "Doktè Fèy AI",
            Tab::Profile => "Pwofil",
        }
    }
}

/// A drill-down view layered over the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Plant(String),
    Disease(String),
}

/// What is on screen, ignoring the scan overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Diseases,
    Plants,
    Chat,
    Profile,
    PlantDetail(String),
    DiseaseDetail(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    tab: Tab,
    detail: Option<Detail>,
    search_query: String,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn screen(&self) -> Screen {
        match &self.detail {
            Some(Detail::Plant(id)) => Screen::PlantDetail(id.clone()),
            Some(Detail::Disease(id)) => Screen::DiseaseDetail(id.clone()),
            None => match self.tab {
                Tab::Home => Screen::Home,
                Tab::Diseases => Screen::Diseases,
                Tab::Plants => Screen::Plants,
                Tab::Chat => Screen::Chat,
                Tab::Profile => Screen::Profile,
            },
        }
    }

    /// Switches tab, clearing the search query and any open detail.
    /// Returns `false` when already showing that tab with nothing on top.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.tab == tab && self.detail.is_none() {
            return false;
        }
        self.tab = tab;
        self.detail = None;
        self.search_query.clear();
        true
    }

    /// Opens a plant detail, replacing any open detail.
    pub fn open_plant(&mut self, plant_id: impl Into<String>) {
        self.detail = Some(Detail::Plant(plant_id.into()));
    }

    /// Opens a disease detail, replacing any open detail.
    pub fn open_disease(&mut self, disease_id: impl Into<String>) {
        self.detail = Some(Detail::Disease(disease_id.into()));
    }

    /// Closes the open detail. Returns `false` if none was open.
    pub fn back(&mut self) -> bool {
        self.detail.take().is_some()
    }

    /// Moves from a disease detail straight to one of its remedy plants.
    /// Returns `false`, leaving the state untouched, when no disease detail is open.
    pub fn select_remedy_from_disease(&mut self, plant_id: impl Into<String>) -> bool {
        match self.detail {
            Some(Detail::Disease(_)) => {
                self.detail = Some(Detail::Plant(plant_id.into()));
                true
            }
            _ => false,
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_home_with_nothing_open() {
        let nav = Navigation::new();
        assert_eq!(nav.screen(), Screen::Home);
        assert_eq!(nav.search_query(), "");
    }

    #[test]
    fn select_tab_clears_query_and_detail() {
        let mut nav = Navigation::new();
        assert!(nav.select_tab(Tab::Plants));
        nav.set_search_query("aso");
        nav.open_plant("p1");

        assert!(nav.select_tab(Tab::Diseases));
        assert_eq!(nav.screen(), Screen::Diseases);
        assert_eq!(nav.search_query(), "");
    }

    #[test]
    fn reselecting_the_active_tab_is_a_no_op() {
        let mut nav = Navigation::new();
        nav.select_tab(Tab::Plants);
        nav.set_search_query("lalo");

        let before = nav.clone();
        assert!(!nav.select_tab(Tab::Plants));
        assert_eq!(nav, before);
    }

    #[test]
    fn reselecting_the_active_tab_closes_a_detail() {
        let mut nav = Navigation::new();
        nav.select_tab(Tab::Plants);
        nav.open_plant("p2");
        assert!(nav.select_tab(Tab::Plants));
        assert_eq!(nav.screen(), Screen::Plants);
    }

    #[test]
    fn details_replace_each_other() {
        let mut nav = Navigation::new();
        let steps: [(&str, bool); 5] = [
            ("p1", true),
            ("m1", false),
            ("m2", false),
            ("p3", true),
            ("m4", false),
        ];
        for (id, is_plant) in steps {
            if is_plant {
                nav.open_plant(id);
                assert_eq!(nav.detail(), Some(&Detail::Plant(id.to_string())));
            } else {
                nav.open_disease(id);
                assert_eq!(nav.detail(), Some(&Detail::Disease(id.to_string())));
            }
        }
    }

    #[test]
    fn back_returns_to_the_underlying_tab() {
        let mut nav = Navigation::new();
        nav.select_tab(Tab::Diseases);
        nav.open_disease("m3");
        assert!(nav.back());
        assert_eq!(nav.screen(), Screen::Diseases);
        assert!(!nav.back());
    }

    #[test]
    fn remedy_jump_requires_an_open_disease() {
        let mut nav = Navigation::new();
        assert!(!nav.select_remedy_from_disease("p1"));
        assert_eq!(nav.screen(), Screen::Home);

        nav.open_plant("p2");
        assert!(!nav.select_remedy_from_disease("p1"));
        assert_eq!(nav.screen(), Screen::PlantDetail("p2".into()));

        nav.open_disease("m3");
        assert!(nav.select_remedy_from_disease("p1"));
        assert_eq!(nav.screen(), Screen::PlantDetail("p1".into()));
    }

    #[test]
    fn every_tab_has_a_title() {
        for tab in [Tab::Home, Tab::Diseases, Tab::Plants, Tab::Chat, Tab::Profile] {
            assert!(!tab.title().is_empty());
        }
    }
}
