use orgbot_core::lexicon::{is_hr_query, HR_TERMS};

/// Lowercases the query and, for employment questions, appends every HR synonym.
///
/// The extra terms raise overlap with recruiting pages over generic pages that
/// only mention the company.
pub fn expand_query(query: &str) -> String {
	let mut q = query.to_lowercase();
	if is_hr_query(&q) {
		q.push(' ');
		q.push_str(&HR_TERMS.join(" "));
	}
	q
}
