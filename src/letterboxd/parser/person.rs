use scraper::node::Element;

use super::{class_contains, Scanner};
use crate::letterboxd::schema::{Person, Role};
use crate::letterboxd::ORIGIN;

#[derive(Debug, Default)]
pub struct PersonScanner {
    people: Vec<Person>,
    current: Option<PartialPerson>,
    in_name_link: bool,
    in_known_for_link: bool,
}

#[derive(Debug, Default)]
struct PartialPerson {
    name: String,
    role: Option<Role>,
    known_for: Vec<String>,
    url: String,
}

impl PartialPerson {
    fn build(self) -> Person {
        Person::builder()
            .name(self.name)
            .role(self.role)
            .known_for(self.known_for)
            .url(self.url)
            .build()
    }
}

impl Scanner for PersonScanner {
    type Record = Person;

    fn handle_open(&mut self, element: &Element) {
        if element.name() == "li" && class_contains(element, "search-result") {
            self.current = Some(PartialPerson {
                role: element.attr("class").and_then(Role::from_container_class),
                ..Default::default()
            });
            self.in_name_link = false;
            self.in_known_for_link = false;
            return;
        }
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if element.name() == "a" {
            let href = element.attr("href").unwrap_or_default();
            if current.url.is_empty() && !href.is_empty() {
                // The first link inside a result is the person's name.
                current.url = format!("{ORIGIN}{href}");
                self.in_name_link = true;
            } else if class_contains(element, "text-slug") {
                // Known-for film links; there may be several.
                self.in_known_for_link = true;
            }
        }
    }

    fn handle_text(&mut self, text: &str) {
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if self.in_name_link {
            current.name = text.trim().to_owned();
        } else if self.in_known_for_link {
            let title = text.trim();
            if !title.is_empty() {
                current.known_for.push(title.to_owned());
            }
        }
    }

    fn handle_close(&mut self, name: &str) {
        match name {
            "li" => {
                // A tentative person without a name is dropped silently.
                if let Some(current) = self.current.take() {
                    if !current.name.is_empty() {
                        self.people.push(current.build());
                    }
                }
                self.in_name_link = false;
                self.in_known_for_link = false;
            }
            "a" => {
                // Nesting on this page is not trusted; reset both states.
                self.in_name_link = false;
                self.in_known_for_link = false;
            }
            _ => {}
        }
    }

    fn finish(self) -> Vec<Person> {
        self.people
    }
}

#[cfg(test)]
mod tests {
    use super::PersonScanner;
    use crate::letterboxd::parser::scan;
    use crate::letterboxd::schema::Role;

    const KEANU: &str = r#"
        <li class="search-result -contributor -actor">
            <h2 class="title-2"><a href="/actor/keanu-reeves/">Keanu Reeves</a></h2>
            <p class="film-metadata">
                Star of <a href="/film/the-matrix/" class="text-slug">The Matrix</a>
                and <a href="/film/john-wick/" class="text-slug">John Wick</a>
            </p>
        </li>
    "#;

    #[test]
    fn parses_a_person_result() {
        let people = scan::<PersonScanner>(KEANU);
        assert_eq!(people.len(), 1);
        let person = &people[0];
        assert_eq!(person.name(), "Keanu Reeves");
        assert_eq!(person.role(), Some(Role::Actor));
        assert_eq!(person.url(), "https://letterboxd.com/actor/keanu-reeves/");
        assert_eq!(person.known_for(), &["The Matrix", "John Wick"]);
    }

    #[test]
    fn role_defaults_to_none_without_a_marker() {
        let html = r#"
            <li class="search-result -contributor">
                <a href="/s/unknown/">Somebody</a>
            </li>
        "#;
        let people = scan::<PersonScanner>(html);
        assert_eq!(people[0].role(), None);
    }

    #[test]
    fn first_role_marker_in_priority_order_wins() {
        let html = r#"
            <li class="search-result -contributor -director -actor">
                <a href="/actor/somebody/">Somebody</a>
            </li>
        "#;
        let people = scan::<PersonScanner>(html);
        assert_eq!(people[0].role(), Some(Role::Actor));
    }

    #[test]
    fn result_without_a_name_is_dropped() {
        let html = r#"
            <li class="search-result -actor">
                <a href="/actor/ghost/"></a>
                <a href="/film/spirited-away/" class="text-slug">Spirited Away</a>
            </li>
        "#;
        assert!(scan::<PersonScanner>(html).is_empty());
    }

    #[test]
    fn only_the_first_link_sets_the_url() {
        let people = scan::<PersonScanner>(KEANU);
        assert_eq!(people[0].url(), "https://letterboxd.com/actor/keanu-reeves/");
    }

    #[test]
    fn known_for_links_without_the_slug_class_are_ignored() {
        let html = r#"
            <li class="search-result -director">
                <a href="/director/nolan/">Christopher Nolan</a>
                <a href="/film/tenet/">Tenet</a>
            </li>
        "#;
        let people = scan::<PersonScanner>(html);
        assert!(people[0].known_for().is_empty());
    }

    #[test]
    fn preserves_document_order() {
        let html = r#"
            <ul>
              <li class="search-result -actor"><a href="/actor/a/">Ana</a></li>
              <li class="search-result -writer"><a href="/writer/b/">Ben</a></li>
            </ul>
        "#;
        let people = scan::<PersonScanner>(html);
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name(), "Ana");
        assert_eq!(people[1].name(), "Ben");
    }

    #[test]
    fn tolerates_malformed_markup() {
        let html = r#"
            <li class="search-result -actor">
                <h2><a href="/actor/toshiro-mifune/">Toshiro Mifune
            </li>
            </div>
        "#;
        let people = scan::<PersonScanner>(html);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name(), "Toshiro Mifune");
    }
}
