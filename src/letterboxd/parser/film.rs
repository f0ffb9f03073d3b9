use itertools::Itertools;
use scraper::node::Element;

use super::{class_contains, Scanner};
use crate::letterboxd::schema::Film;
use crate::letterboxd::ORIGIN;

#[derive(Debug, Default)]
pub struct FilmScanner {
    films: Vec<Film>,
    current: Option<PartialFilm>,
    in_director_link: bool,
}

#[derive(Debug, Default)]
struct PartialFilm {
    id: String,
    title: String,
    year: String,
    url: String,
    directors: Vec<String>,
}

impl PartialFilm {
    fn build(self) -> Film {
        Film::builder()
            .title(self.title)
            .year(self.year)
            .director(self.directors.iter().join(", "))
            .url(self.url)
            .id(self.id)
            .build()
    }
}

impl Scanner for FilmScanner {
    type Record = Film;

    fn handle_open(&mut self, element: &Element) {
        if element.name() == "li" && class_contains(element, "search-result") {
            self.current = Some(PartialFilm::default());
            self.in_director_link = false;
            return;
        }
        let Some(current) = self.current.as_mut() else {
            return;
        };
        match element.name() {
            // The react component carries the film's identity as data attributes.
            "div" if class_contains(element, "react-component") => {
                let slug = element.attr("data-item-slug").unwrap_or_default();
                if slug.is_empty() {
                    return;
                }
                current.id = slug.to_owned();
                let link = match element.attr("data-item-link") {
                    Some(link) => link.to_owned(),
                    None => format!("/film/{slug}/"),
                };
                current.url = format!("{ORIGIN}{link}");
                if let Some(name) = element.attr("data-item-name") {
                    // Display names look like "The Matrix (1999)". The year
                    // is split off at the last " (" so that titles which
                    // themselves contain parentheses survive intact.
                    match name.rfind(" (") {
                        Some(at) => {
                            current.title = name[..at].to_owned();
                            let year = &name[at + 2..];
                            current.year = year.strip_suffix(')').unwrap_or(year).to_owned();
                        }
                        None => current.title = name.to_owned(),
                    }
                }
            }
            "a" => {
                let href = element.attr("href").unwrap_or_default();
                if href.contains("/director/") && class_contains(element, "text-slug") {
                    self.in_director_link = true;
                }
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, text: &str) {
        if !self.in_director_link {
            return;
        }
        let director = text.trim();
        if director.is_empty() {
            return;
        }
        if let Some(current) = self.current.as_mut() {
            current.directors.push(director.to_owned());
        }
    }

    fn handle_close(&mut self, name: &str) {
        match name {
            "li" => {
                // A tentative film without a title is dropped, not an error.
                if let Some(current) = self.current.take() {
                    if !current.title.is_empty() {
                        self.films.push(current.build());
                    }
                }
                self.in_director_link = false;
            }
            "a" => self.in_director_link = false,
            _ => {}
        }
    }

    fn finish(self) -> Vec<Film> {
        self.films
    }
}
