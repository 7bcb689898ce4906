//! Terminal rendering of the list state and parsing of typed commands.

use client_core::ViewState;
use shared::domain::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Reload,
    Quit,
    Search(String),
}

pub fn parse_input(line: &str) -> Input {
    match line.trim_end_matches(['\r', '\n']) {
        ":r" | ":reload" => Input::Reload,
        ":q" | ":quit" => Input::Quit,
        other => Input::Search(other.to_string()),
    }
}

pub fn render_view_state(state: &ViewState, query: &str) -> String {
    match state {
        ViewState::Loading => "Loading users...".to_string(),
        ViewState::Success(users) => render_users(users, query),
        ViewState::Error(message) => {
            format!("Something went wrong: {message}\nType :reload to try again.")
        }
    }
}

fn render_users(users: &[User], query: &str) -> String {
    let mut out = String::new();
    for user in users {
        out.push_str(&render_user(user));
        out.push('\n');
    }

    let noun = if users.len() == 1 { "user" } else { "users" };
    if query.trim().is_empty() {
        out.push_str(&format!("{} {noun}", users.len()));
    } else {
        out.push_str(&format!("{} {noun} matching '{query}'", users.len()));
    }
    out
}

pub fn render_user(user: &User) -> String {
    format!("#{} {}  {}  {}", user.id, user.name, user.email, user.phone)
}
