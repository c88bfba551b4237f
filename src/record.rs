use std::fmt;

pub const NOT_FOUND: &str = "Not Found";
pub const REQUEST_ERROR: &str = "Request Error";

/// One extracted value, or the reason there isn't one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Found(String),
    NotFound,
    RequestError,
}

impl Field {
    pub fn is_found(&self) -> bool {
        matches!(self, Field::Found(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Field::Found(v) => v,
            Field::NotFound => NOT_FOUND,
            Field::RequestError => REQUEST_ERROR,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub url: String,
    pub product_name: Field,
    pub price: Field,
    pub barcode: Field,
}

impl Record {
    /// Record for a URL whose page could not be fetched.
    pub fn request_error(url: &str) -> Self {
        Record {
            url: url.to_string(),
            product_name: Field::RequestError,
            price: Field::RequestError,
            barcode: Field::RequestError,
        }
    }

    /// Field values in report column order.
    pub fn columns(&self) -> [&str; 4] {
        [
            &self.url,
            self.product_name.as_str(),
            self.price.as_str(),
            self.barcode.as_str(),
        ]
    }
}

/// Records in the same order as the URLs they were scraped from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<Record>,
}

pub struct Summary {
    pub complete: usize,
    pub partial: usize,
    pub request_errors: usize,
}

impl ResultSet {
    pub fn push(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn summary(&self) -> Summary {
        let mut s = Summary {
            complete: 0,
            partial: 0,
            request_errors: 0,
        };
        for r in &self.records {
            let fields = [&r.product_name, &r.price, &r.barcode];
            if fields.iter().any(|f| **f == Field::RequestError) {
                s.request_errors += 1;
            } else if fields.iter().all(|f| f.is_found()) {
                s.complete += 1;
            } else {
                s.partial += 1;
            }
        }
        s
    }
}

impl FromIterator<Record> for ResultSet {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        ResultSet {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
