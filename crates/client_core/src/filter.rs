//! Case-insensitive substring search over the user fields shown in the list.

use shared::domain::User;

/// Returns the users matching `query`, in dataset order.
///
/// A blank query (empty or whitespace only) returns the dataset unchanged. Any
/// other query is lower-cased as-is, without trimming, and matched as a
/// substring against the lower-cased name, email, phone, username, website,
/// city and company name.
pub fn apply_filter(dataset: &[User], query: &str) -> Vec<User> {
    if query.trim().is_empty() {
        return dataset.to_vec();
    }

    let needle = query.to_lowercase();
    dataset
        .iter()
        .filter(|user| user_matches(user, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lower-cased.
fn user_matches(user: &User, needle: &str) -> bool {
    searchable_fields(user)
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn searchable_fields(user: &User) -> [&str; 7] {
    [
        user.name.as_str(),
        user.email.as_str(),
        user.phone.as_str(),
        user.username.as_str(),
        user.website.as_str(),
        user.address.city.as_str(),
        user.company.name.as_str(),
    ]
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
