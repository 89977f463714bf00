/// Static landing page for government schemes. The navigational intent can
/// carry a search term, which pre-fills the page's search box.
pub struct GovSchemesPage {
    pub search_term: String,
}

impl GovSchemesPage {
    pub fn open(search_term: String) -> Self {
        Self { search_term }
    }

    pub fn render(&self) -> String {
        let mut out = String::from(
            "🏛️ Government Schemes\n\
             Find the latest government schemes and subsidies available for farmers.\n",
        );
        if !self.search_term.is_empty() {
            out.push_str(&format!("Showing schemes related to: {}\n", self.search_term));
        }
        out
    }
}
