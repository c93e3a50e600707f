//! Greedy vertical packing of subtopic bodies onto fixed-size slides.

use crate::types::{Page, PageGeometry, Subtopic};
use crate::Result;

/// Splits a subtopic's body across as many pages as its geometry requires.
#[derive(Debug, Clone)]
pub struct Paginator {
    geometry: PageGeometry,
}

impl Paginator {
    /// Create a paginator, rejecting malformed geometries.
    pub fn new(geometry: PageGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Self { geometry })
    }

    /// The geometry pages are packed against.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Pack the body lines of `subtopic` onto pages titled with its heading.
    ///
    /// A line that exactly fills the remaining height stays on the current
    /// page. Blank lines take a full line of height. A page never breaks
    /// before its first line, so a line taller than an empty page sits
    /// alone. The last page is always emitted, so a heading-only subtopic
    /// still gets one (empty) page.
    pub fn paginate(&self, subtopic: &Subtopic) -> Vec<Page> {
        let mut pages = Vec::new();
        let mut current = Page::subtopic(&subtopic.heading);

        for line in &subtopic.body_lines {
            // Height is recomputed from the line count so repeated float
            // additions cannot push an exact fill over the limit.
            if !current.lines.is_empty() && !self.geometry.fits(current.lines.len() + 1) {
                let full = std::mem::replace(&mut current, Page::subtopic(&subtopic.heading));
                pages.push(full);
            }
            current.add_line(line.as_str());
        }
        pages.push(current);

        log::debug!(
            "Paginated '{}': {} lines onto {} pages",
            subtopic.heading,
            subtopic.body_lines.len(),
            pages.len()
        );

        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn geometry(max: f64, reserve: f64, line: f64) -> PageGeometry {
        PageGeometry::new()
            .with_max_content_height(max)
            .with_title_reserve(reserve)
            .with_line_height(line)
    }

    fn numbered(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("line {}", i)).collect()
    }

    #[test]
    fn test_rejects_malformed_geometry() {
        assert!(matches!(
            Paginator::new(geometry(0.0, 0.0, 1.0)),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            Paginator::new(geometry(10.0, 2.0, 0.0)),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_fits_on_one_page() {
        let paginator = Paginator::new(geometry(5.0, 2.0, 1.0)).unwrap();
        let subtopic = Subtopic::with_body(
            "Light Reaction",
            vec!["Occurs in thylakoid.", "Uses sunlight."],
        );

        let pages = paginator.paginate(&subtopic);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Light Reaction");
        assert_eq!(pages[0].lines, subtopic.body_lines);
    }

    #[test]
    fn test_twelve_lines_three_per_page() {
        let paginator = Paginator::new(geometry(5.0, 2.0, 1.0)).unwrap();
        let subtopic = Subtopic::with_body("Cells", numbered(12));

        let pages = paginator.paginate(&subtopic);
        assert_eq!(pages.len(), 4);
        for page in &pages {
            assert_eq!(page.lines.len(), 3);
            assert_eq!(page.title, "Cells");
        }
    }

    #[test]
    fn test_exact_fill_stays_on_page() {
        // 3 lines * 1.0 == 5.0 - 2.0
        let paginator = Paginator::new(geometry(5.0, 2.0, 1.0)).unwrap();
        let pages = paginator.paginate(&Subtopic::with_body("T", numbered(3)));
        assert_eq!(pages.len(), 1);

        let pages = paginator.paginate(&Subtopic::with_body("T", numbered(4)));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].lines, vec!["line 4"]);
    }

    #[test]
    fn test_exact_fill_with_fractional_line_height() {
        // 15 * 0.1 == 1.5 exactly, though fifteen running additions exceed it.
        let paginator = Paginator::new(geometry(1.5, 0.0, 0.1)).unwrap();
        let pages = paginator.paginate(&Subtopic::with_body("T", numbered(15)));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 15);

        let pages = paginator.paginate(&Subtopic::with_body("T", numbered(16)));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines.len(), 15);
        assert_eq!(pages[1].lines, vec!["line 16"]);
    }

    #[test]
    fn test_oversized_line_gets_its_own_page() {
        let paginator = Paginator::new(geometry(5.0, 4.5, 1.0)).unwrap();
        let pages = paginator.paginate(&Subtopic::with_body("T", numbered(3)));

        assert_eq!(pages.len(), 3);
        for (page, line) in pages.iter().zip(numbered(3)) {
            assert_eq!(page.lines, vec![line]);
        }
    }

    #[test]
    fn test_empty_body_yields_one_page() {
        let paginator = Paginator::new(PageGeometry::default()).unwrap();
        let pages = paginator.paginate(&Subtopic::new("Summary"));

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Summary");
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_blank_lines_consume_height() {
        let paginator = Paginator::new(geometry(4.0, 1.0, 1.0)).unwrap();
        let subtopic = Subtopic::with_body("T", vec!["a", "", "b", "", "c"]);

        let pages = paginator.paginate(&subtopic);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines, vec!["a", "", "b"]);
        assert_eq!(pages[1].lines, vec!["", "c"]);
    }

    #[test]
    fn test_lossless_repagination() {
        let cases = [
            geometry(5.0, 2.0, 1.0),
            geometry(180.0, 30.0, 10.0),
            geometry(10.0, 0.0, 2.5),
            geometry(7.0, 6.0, 1.0),
            geometry(1.5, 0.0, 0.1),
            geometry(2.0, 1.5, 1.0),
        ];
        for count in [0, 1, 2, 7, 15, 16, 31, 100] {
            let subtopic = Subtopic::with_body("Body", numbered(count));
            for geometry in cases {
                let pages = Paginator::new(geometry).unwrap().paginate(&subtopic);
                assert!(!pages.is_empty());
                let rebuilt: Vec<String> =
                    pages.iter().flat_map(|p| p.lines.iter().cloned()).collect();
                assert_eq!(rebuilt, subtopic.body_lines);
                // Only the last page may be short or empty.
                for page in &pages[..pages.len() - 1] {
                    assert_eq!(page.lines.len(), geometry.lines_per_page());
                }
            }
        }
    }
}
