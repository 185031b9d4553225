use clap::ValueEnum;

use crate::{Error, Result, DEFAULT_PAGE_SIZE};

/// Diamond shapes, by the two-letter code the search grid expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    #[value(name = "RD")]
    Round,
    #[value(name = "PR")]
    Princess,
    #[value(name = "EC")]
    Emerald,
    #[value(name = "AS")]
    Asscher,
    #[value(name = "CU")]
    Cushion,
    #[value(name = "MQ")]
    Marquise,
    #[value(name = "RA")]
    Radiant,
    #[value(name = "OV")]
    Oval,
    #[value(name = "PS")]
    Pear,
    #[value(name = "HS")]
    Heart,
}

impl Shape {
    pub fn code(self) -> &'static str {
        match self {
            Shape::Round => "RD",
            Shape::Princess => "PR",
            Shape::Emerald => "EC",
            Shape::Asscher => "AS",
            Shape::Cushion => "CU",
            Shape::Marquise => "MQ",
            Shape::Radiant => "RA",
            Shape::Oval => "OV",
            Shape::Pear => "PS",
            Shape::Heart => "HS",
        }
    }
}

// Grades below are declared worst to best, so the derived `Ord` is the grade order.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Cut {
    #[value(name = "Good")]
    Good,
    #[value(name = "Very Good")]
    VeryGood,
    #[value(name = "Ideal")]
    Ideal,
    #[value(name = "Signature Ideal")]
    SignatureIdeal,
}

impl Cut {
    pub fn label(self) -> &'static str {
        match self {
            Cut::Good => "Good",
            Cut::VeryGood => "Very Good",
            Cut::Ideal => "Ideal",
            Cut::SignatureIdeal => "Signature Ideal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Color {
    #[value(name = "J")]
    J,
    #[value(name = "I")]
    I,
    #[value(name = "H")]
    H,
    #[value(name = "G")]
    G,
    #[value(name = "F")]
    F,
    #[value(name = "E")]
    E,
    #[value(name = "D")]
    D,
}

impl Color {
    pub fn label(self) -> &'static str {
        match self {
            Color::J => "J",
            Color::I => "I",
            Color::H => "H",
            Color::G => "G",
            Color::F => "F",
            Color::E => "E",
            Color::D => "D",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Clarity {
    #[value(name = "SI2")]
    Si2,
    #[value(name = "SI1")]
    Si1,
    #[value(name = "VS2")]
    Vs2,
    #[value(name = "VS1")]
    Vs1,
    #[value(name = "VVS2")]
    Vvs2,
    #[value(name = "VVS1")]
    Vvs1,
    #[value(name = "IF")]
    If,
    #[value(name = "FL")]
    Fl,
}

impl Clarity {
    pub fn label(self) -> &'static str {
        match self {
            Clarity::Si2 => "SI2",
            Clarity::Si1 => "SI1",
            Clarity::Vs2 => "VS2",
            Clarity::Vs1 => "VS1",
            Clarity::Vvs2 => "VVS2",
            Clarity::Vvs1 => "VVS1",
            Clarity::If => "IF",
            Clarity::Fl => "FL",
        }
    }
}

/// Filters and paging settings for one search request.
///
/// `min_price` doubles as the pagination cursor: the collector rewrites it between
/// requests through [`QuerySpec::with_min_price`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub shapes: Vec<Shape>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_carat: Option<f64>,
    pub max_carat: Option<f64>,
    pub min_cut: Option<Cut>,
    pub max_cut: Option<Cut>,
    pub min_color: Option<Color>,
    pub max_color: Option<Color>,
    pub min_clarity: Option<Clarity>,
    pub max_clarity: Option<Clarity>,
    pub start_index: u32,
    pub page_size: u32,
    pub country: String,
    pub language: String,
    pub currency: String,
    pub sort_column: String,
    pub sort_direction: String,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            min_price: None,
            max_price: None,
            min_carat: None,
            max_carat: None,
            min_cut: None,
            max_cut: None,
            min_color: None,
            max_color: None,
            min_clarity: None,
            max_clarity: None,
            start_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            country: "USA".into(),
            language: "en-us".into(),
            currency: "USD".into(),
            sort_column: "price".into(),
            sort_direction: "asc".into(),
        }
    }
}

impl QuerySpec {
    /// Returns a copy of the query with the price floor moved to `cursor`.
    pub fn with_min_price(&self, cursor: Option<u64>) -> Self {
        Self {
            min_price: cursor,
            ..self.clone()
        }
    }

    /// Price-cursor paging only works on results sorted by ascending price.
    pub fn ensure_price_ascending(&self) -> Result<()> {
        if self.sort_column == "price" && self.sort_direction == "asc" {
            Ok(())
        } else {
            Err(Error::UnsortedQuery {
                column: self.sort_column.clone(),
                direction: self.sort_direction.clone(),
            })
        }
    }

    /// Rejects bounds that can never match anything.
    pub fn ensure_ranges(&self) -> Result<()> {
        fn check<T: PartialOrd>(min: Option<T>, max: Option<T>, field: &'static str) -> Result<()> {
            match (min, max) {
                (Some(min), Some(max)) if min > max => Err(Error::InvalidRange(field)),
                _ => Ok(()),
            }
        }

        check(self.min_price, self.max_price, "price")?;
        check(self.min_carat, self.max_carat, "carat")?;
        check(self.min_cut, self.max_cut, "cut")?;
        check(self.min_color, self.max_color, "color")?;
        check(self.min_clarity, self.max_clarity, "clarity")?;
        if self.page_size == 0 {
            return Err(Error::InvalidRange("pageSize"));
        }
        Ok(())
    }

    /// Request parameters in the search grid's naming. Unset filters are left out and
    /// every shape is sent as its own `shape` pair.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = self
            .shapes
            .iter()
            .map(|shape| ("shape", shape.code().to_string()))
            .collect();

        let optional = [
            ("minPrice", self.min_price.map(|p| p.to_string())),
            ("maxPrice", self.max_price.map(|p| p.to_string())),
            ("minCarat", self.min_carat.map(|c| c.to_string())),
            ("maxCarat", self.max_carat.map(|c| c.to_string())),
            ("minCut", self.min_cut.map(|c| c.label().to_string())),
            ("maxCut", self.max_cut.map(|c| c.label().to_string())),
            ("minColor", self.min_color.map(|c| c.label().to_string())),
            ("maxColor", self.max_color.map(|c| c.label().to_string())),
            ("minClarity", self.min_clarity.map(|c| c.label().to_string())),
            ("maxClarity", self.max_clarity.map(|c| c.label().to_string())),
        ];
        params.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        );

        params.extend([
            ("startIndex", self.start_index.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("country", self.country.clone()),
            ("language", self.language.clone()),
            ("currency", self.currency.clone()),
            ("sortColumn", self.sort_column.clone()),
            ("sortDirection", self.sort_direction.clone()),
        ]);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn default_query_sends_only_fixed_settings() {
        let params = QuerySpec::default().params();

        assert_eq!(params.len(), 7);
        assert_eq!(value_of(&params, "pageSize"), Some("1000"));
        assert_eq!(value_of(&params, "sortColumn"), Some("price"));
        assert_eq!(value_of(&params, "sortDirection"), Some("asc"));
        assert_eq!(value_of(&params, "minPrice"), None);
    }

    #[test]
    fn shapes_are_repeated_and_grades_use_labels() {
        let query = QuerySpec {
            shapes: vec![Shape::Round, Shape::Pear],
            min_cut: Some(Cut::VeryGood),
            max_clarity: Some(Clarity::Vvs1),
            min_carat: Some(0.5),
            ..QuerySpec::default()
        };
        let params = query.params();

        let shapes: Vec<_> = params
            .iter()
            .filter(|(k, _)| *k == "shape")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(shapes, ["RD", "PS"]);
        assert_eq!(value_of(&params, "minCut"), Some("Very Good"));
        assert_eq!(value_of(&params, "maxClarity"), Some("VVS1"));
        assert_eq!(value_of(&params, "minCarat"), Some("0.5"));
    }

    #[test]
    fn cursor_replaces_min_price_only() {
        let query = QuerySpec {
            min_price: Some(100),
            max_price: Some(5000),
            ..QuerySpec::default()
        };
        let next = query.with_min_price(Some(500));

        assert_eq!(next.min_price, Some(500));
        assert_eq!(next.max_price, Some(5000));
        assert_eq!(query.min_price, Some(100));
    }

    #[test]
    fn descending_sort_is_rejected() {
        let query = QuerySpec {
            sort_direction: "desc".into(),
            ..QuerySpec::default()
        };
        assert!(matches!(
            query.ensure_price_ascending(),
            Err(Error::UnsortedQuery { .. })
        ));

        let query = QuerySpec {
            sort_column: "carat".into(),
            ..QuerySpec::default()
        };
        assert!(query.ensure_price_ascending().is_err());
        assert!(QuerySpec::default().ensure_price_ascending().is_ok());
    }

    #[test]
    fn inverted_grade_range_is_rejected() {
        let query = QuerySpec {
            min_color: Some(Color::D),
            max_color: Some(Color::J),
            ..QuerySpec::default()
        };
        assert!(matches!(
            query.ensure_ranges(),
            Err(Error::InvalidRange("color"))
        ));

        let query = QuerySpec {
            min_clarity: Some(Clarity::Si1),
            max_clarity: Some(Clarity::If),
            ..QuerySpec::default()
        };
        assert!(query.ensure_ranges().is_ok());
    }
}
