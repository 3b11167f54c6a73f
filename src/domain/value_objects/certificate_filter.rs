//! Certificate search criteria.

use std::str::FromStr;

/// Column a certificate listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    CreateDate,
    LastUpdateDate,
}

impl SortField {
    /// SQL column for ORDER BY.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "c.id",
            Self::Name => "c.name",
            Self::CreateDate => "c.create_date",
            Self::LastUpdateDate => "c.last_update_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering of a certificate listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CertificateSort {
    pub field: SortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported sort '{0}', expected <name|createDate|lastUpdateDate>[,asc|desc]")]
pub struct InvalidSort(pub String);

impl FromStr for CertificateSort {
    type Err = InvalidSort;

    /// Parses `field[,direction]`, e.g. `name`, `createDate,desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);

        let field = match parts.next().unwrap_or_default() {
            "id" => SortField::Id,
            "name" => SortField::Name,
            "createDate" | "create_date" | "date" => SortField::CreateDate,
            "lastUpdateDate" | "last_update_date" => SortField::LastUpdateDate,
            _ => return Err(InvalidSort(s.to_string())),
        };

        let direction = match parts.next().map(|d| d.to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "asc" => SortDirection::Asc,
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(_) => return Err(InvalidSort(s.to_string())),
        };

        if parts.next().is_some() {
            return Err(InvalidSort(s.to_string()));
        }

        Ok(Self { field, direction })
    }
}

/// Filters applied to a certificate listing. Empty filter matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificateFilter {
    /// Certificates must carry every one of these tags.
    pub tag_names: Vec<String>,
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    pub sort: CertificateSort,
}

impl CertificateFilter {
    pub fn is_empty(&self) -> bool {
        self.tag_names.is_empty() && self.search.is_none()
    }
}
