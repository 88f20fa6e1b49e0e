use crate::utils::error::{Entity, FairError, Result};
use crate::utils::validation::{require_non_blank, validate_range};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Case-insensitive natural key.
///
/// Keeps the text as it was entered (trimmed) for display, and compares,
/// hashes and orders on the lowercased form only.
#[derive(Debug, Clone)]
pub struct Key {
    display: String,
    normalized: String,
}

impl Key {
    pub fn new(field_name: &str, raw: &str) -> Result<Self> {
        let display = require_non_blank(field_name, raw)?;
        let normalized = display.to_lowercase();
        Ok(Self {
            display,
            normalized,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True when `raw` names this key, ignoring case and surrounding whitespace.
    pub fn matches(&self, raw: &str) -> bool {
        self.normalized == raw.trim().to_lowercase()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

/// A participating company. Identity is the case-insensitive name.
#[derive(Debug, Clone, Serialize)]
pub struct Company {
    name: Key,
    sector: String,
    email: String,
}

impl Company {
    pub fn new(name: &str, sector: &str, email: &str) -> Result<Self> {
        Ok(Self {
            name: Key::new("company name", name)?,
            sector: require_non_blank("sector", sector)?,
            email: require_non_blank("email", email)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn key(&self) -> &Key {
        &self.name
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_sector(&mut self, sector: &str) -> Result<()> {
        self.sector = require_non_blank("sector", sector)?;
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<()> {
        self.email = require_non_blank("email", email)?;
        Ok(())
    }
}

impl PartialEq for Company {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Company {}

impl Hash for Company {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.sector, self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum StandSize {
    Small,
    Medium,
    Large,
}

impl FromStr for StandSize {
    type Err = FairError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "small" | "pequeno" => Ok(StandSize::Small),
            "2" | "medium" | "mediano" => Ok(StandSize::Medium),
            "3" | "large" | "grande" => Ok(StandSize::Large),
            other => Err(FairError::invalid(
                "stand size",
                format!("unknown size '{}', expected SMALL, MEDIUM or LARGE", other),
            )),
        }
    }
}

impl TryFrom<String> for StandSize {
    type Error = FairError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for StandSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandSize::Small => write!(f, "SMALL"),
            StandSize::Medium => write!(f, "MEDIUM"),
            StandSize::Large => write!(f, "LARGE"),
        }
    }
}

/// Which company, if any, currently holds a stand. The stand only refers to
/// the company by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "company", rename_all = "snake_case")]
pub enum Assignment {
    Available,
    AssignedTo(Key),
}

/// Rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i32) -> Result<Self> {
        validate_range("rating", value, MIN_RATING, MAX_RATING)?;
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dated, rated note left by a visitor on a stand. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    visitor_id: Key,
    date: NaiveDate,
    rating: Rating,
    text: String,
}

impl Comment {
    pub fn new(visitor_id: &str, date: NaiveDate, rating: Rating, text: &str) -> Result<Self> {
        Ok(Self {
            visitor_id: Key::new("visitor id", visitor_id)?,
            date,
            rating,
            text: require_non_blank("comment text", text)?,
        })
    }

    pub fn visitor_id(&self) -> &str {
        self.visitor_id.as_str()
    }

    pub fn author(&self) -> &Key {
        &self.visitor_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {} [{}]",
            self.date, self.rating, self.text, self.visitor_id
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Stand {
    number: Key,
    location: String,
    size: StandSize,
    assignment: Assignment,
    comments: Vec<Comment>,
}

impl Stand {
    pub fn new(number: &str, location: &str, size: StandSize) -> Result<Self> {
        Ok(Self {
            number: Key::new("stand number", number)?,
            location: require_non_blank("location", location)?,
            size,
            assignment: Assignment::Available,
            comments: Vec::new(),
        })
    }

    pub fn number(&self) -> &str {
        self.number.as_str()
    }

    pub fn key(&self) -> &Key {
        &self.number
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn size(&self) -> StandSize {
        self.size
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Key of the assigned company, if any.
    pub fn assigned_company(&self) -> Option<&Key> {
        match &self.assignment {
            Assignment::Available => None,
            Assignment::AssignedTo(company) => Some(company),
        }
    }

    pub fn is_available(&self) -> bool {
        self.assignment == Assignment::Available
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn average_rating(&self) -> Option<f64> {
        if self.comments.is_empty() {
            return None;
        }
        let total: u32 = self
            .comments
            .iter()
            .map(|c| u32::from(c.rating.value()))
            .sum();
        Some(f64::from(total) / self.comments.len() as f64)
    }

    pub(crate) fn assign(&mut self, company: &Company) -> Result<()> {
        if let Assignment::AssignedTo(current) = &self.assignment {
            return Err(FairError::Conflict {
                stand: self.number.to_string(),
                company: current.to_string(),
            });
        }
        self.assignment = Assignment::AssignedTo(company.key().clone());
        Ok(())
    }

    pub(crate) fn unassign(&mut self) {
        self.assignment = Assignment::Available;
    }

    pub(crate) fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Drops every comment authored by `visitor`, returning how many went.
    pub(crate) fn remove_comments_by(&mut self, visitor: &Key) -> usize {
        let before = self.comments.len();
        self.comments.retain(|c| &c.visitor_id != visitor);
        before - self.comments.len()
    }
}

impl fmt::Display for Stand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stand {} [{}] {} (", self.number, self.size, self.location)?;
        match &self.assignment {
            Assignment::Available => write!(f, "AVAILABLE)")?,
            Assignment::AssignedTo(company) => write!(f, "OCCUPIED by {})", company)?,
        }
        if let Some(avg) = self.average_rating() {
            write!(f, " | ★{:.2}", avg)?;
        }
        Ok(())
    }
}

/// A fair visitor. Identity is the case-insensitive identification code.
#[derive(Debug, Clone, Serialize)]
pub struct Visitor {
    id: Key,
    name: String,
    email: String,
}

impl Visitor {
    pub fn new(id: &str, name: &str, email: &str) -> Result<Self> {
        Ok(Self {
            id: Key::new("visitor id", id)?,
            name: require_non_blank("name", name)?,
            email: require_non_blank("email", email)?,
        })
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn key(&self) -> &Key {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = require_non_blank("name", name)?;
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<()> {
        self.email = require_non_blank("email", email)?;
        Ok(())
    }
}

impl PartialEq for Visitor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Visitor {}

impl Hash for Visitor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Visitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.id, self.name, self.email)
    }
}

/// Entity label used in lookup errors.
pub(crate) trait Keyed {
    const ENTITY: Entity;
    fn natural_key(&self) -> &Key;
}

impl Keyed for Company {
    const ENTITY: Entity = Entity::Company;
    fn natural_key(&self) -> &Key {
        &self.name
    }
}

impl Keyed for Stand {
    const ENTITY: Entity = Entity::Stand;
    fn natural_key(&self) -> &Key {
        &self.number
    }
}

impl Keyed for Visitor {
    const ENTITY: Entity = Entity::Visitor;
    fn natural_key(&self) -> &Key {
        &self.id
    }
}
