use getset::{CopyGetters, Getters};
use itertools::Itertools;
use strum::{Display, EnumIter, IntoEnumIterator};
use typed_builder::TypedBuilder;

use crate::alfred::{AsItem, Icon, Item};

/// A film search result.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Getters)]
#[getset(get = "pub")]
pub struct Film {
    #[builder(setter(into))]
    title: String,
    #[builder(default, setter(into))]
    year: String,
    /// Comma-joined when a film credits several directors.
    #[builder(default, setter(into))]
    director: String,
    #[builder(setter(into))]
    url: String,
    /// Site-assigned slug, unique per film.
    #[builder(setter(into))]
    id: String,
}

impl AsItem for Film {
    fn as_item(&self) -> Item {
        let title = if self.year.is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.year)
        };
        let subtitle = if self.director.is_empty() {
            String::new()
        } else {
            format!("Director: {}", self.director)
        };
        Item::builder()
            .uid(format!("letterboxd-film-{}", self.id))
            .title(title)
            .subtitle(subtitle)
            .arg(self.url.clone())
            .autocomplete(self.title.clone())
            .icon(Icon::workflow())
            .valid(true)
            .build()
    }
}

// Variant order is the detection priority; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Actor,
    Director,
    Producer,
    Writer,
}

impl Role {
    /// Reads the role off a result container's class attribute, which
    /// carries markers like `-actor` or `-director`.
    pub fn from_container_class(class: &str) -> Option<Self> {
        Self::iter().find(|role| class.contains(&format!("-{role}")))
    }

    fn capitalized(self) -> &'static str {
        match self {
            Role::Actor => "Actor",
            Role::Director => "Director",
            Role::Producer => "Producer",
            Role::Writer => "Writer",
        }
    }
}

/// A cast/crew search result.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Getters, CopyGetters)]
pub struct Person {
    #[getset(get = "pub")]
    #[builder(setter(into))]
    name: String,
    #[getset(get_copy = "pub")]
    #[builder(default)]
    role: Option<Role>,
    #[getset(get = "pub")]
    #[builder(default)]
    known_for: Vec<String>,
    #[getset(get = "pub")]
    #[builder(setter(into))]
    url: String,
}

impl AsItem for Person {
    fn as_item(&self) -> Item {
        let mut parts = Vec::new();
        if let Some(role) = self.role {
            parts.push(role.capitalized().to_owned());
        }
        if !self.known_for.is_empty() {
            parts.push(self.known_for.iter().join(", "));
        }
        Item::builder()
            // The display name is the only uniqueness key the site exposes
            // here, so two people sharing a name share a uid.
            .uid(format!("letterboxd-person-{}", self.name))
            .title(self.name.clone())
            .subtitle(parts.join(" \u{2022} "))
            .arg(self.url.clone())
            .autocomplete(self.name.clone())
            .icon(Icon::workflow())
            .valid(true)
            .build()
    }
}
