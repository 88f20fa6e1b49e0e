use crate::domain::model::{Comment, Company, Keyed, Rating, Stand, StandSize, Visitor};
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::{FairError, Result};
use crate::utils::validation::require_non_blank;

/// In-memory registry of companies, stands, visitors and stand comments.
///
/// Every lookup is case-insensitive on the natural key. Collections keep
/// registration order, and `list_*` calls hand out owned snapshots so callers
/// never observe later mutations. Comments live on their stand.
#[derive(Debug)]
pub struct FairRegistry<C: Clock = SystemClock> {
    companies: Vec<Company>,
    stands: Vec<Stand>,
    visitors: Vec<Visitor>,
    clock: C,
}

impl Default for FairRegistry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl FairRegistry<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

fn index_of<T: Keyed>(items: &[T], raw: &str) -> Result<usize> {
    items
        .iter()
        .position(|item| item.natural_key().matches(raw))
        .ok_or_else(|| FairError::not_found(T::ENTITY, raw.trim()))
}

fn ensure_unique<T: Keyed>(items: &[T], candidate: &T) -> Result<()> {
    let key = candidate.natural_key();
    if items.iter().any(|item| item.natural_key() == key) {
        return Err(FairError::duplicate(T::ENTITY, key.as_str()));
    }
    Ok(())
}

/// `None` and blank input both mean "keep the current value".
fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl<C: Clock> FairRegistry<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            companies: Vec::new(),
            stands: Vec::new(),
            visitors: Vec::new(),
            clock,
        }
    }

    // ---- companies ----

    pub fn register_company(&mut self, company: Company) -> Result<()> {
        ensure_unique(&self.companies, &company)?;
        tracing::info!("Registered company {}", company.name());
        self.companies.push(company);
        Ok(())
    }

    pub fn list_companies(&self) -> Vec<Company> {
        self.companies.clone()
    }

    pub fn company(&self, name: &str) -> Result<&Company> {
        index_of(&self.companies, name).map(|i| &self.companies[i])
    }

    pub fn edit_company(
        &mut self,
        name: &str,
        new_sector: Option<&str>,
        new_email: Option<&str>,
    ) -> Result<()> {
        let idx = index_of(&self.companies, name)?;
        let mut updated = self.companies[idx].clone();
        if let Some(sector) = provided(new_sector) {
            updated.set_sector(sector)?;
        }
        if let Some(email) = provided(new_email) {
            updated.set_email(email)?;
        }
        tracing::debug!("Updated company {}", updated.name());
        self.companies[idx] = updated;
        Ok(())
    }

    /// Removes the company and frees every stand it held.
    pub fn delete_company(&mut self, name: &str) -> Result<()> {
        let idx = index_of(&self.companies, name)?;
        let key = self.companies[idx].key().clone();

        let mut freed = 0;
        for stand in self
            .stands
            .iter_mut()
            .filter(|s| s.assigned_company() == Some(&key))
        {
            stand.unassign();
            freed += 1;
        }

        self.companies.remove(idx);
        tracing::info!("Deleted company {} ({} stand(s) freed)", key, freed);
        Ok(())
    }

    // ---- stands ----

    pub fn create_stand(&mut self, number: &str, location: &str, size: StandSize) -> Result<()> {
        let stand = Stand::new(number, location, size)?;
        ensure_unique(&self.stands, &stand)?;
        tracing::info!("Created stand {} [{}]", stand.number(), size);
        self.stands.push(stand);
        Ok(())
    }

    pub fn stand(&self, number: &str) -> Result<&Stand> {
        index_of(&self.stands, number).map(|i| &self.stands[i])
    }

    pub fn list_stands(&self) -> Vec<Stand> {
        self.stands.clone()
    }

    pub fn list_available_stands(&self) -> Vec<Stand> {
        self.stands
            .iter()
            .filter(|s| s.is_available())
            .cloned()
            .collect()
    }

    pub fn list_occupied_stands(&self) -> Vec<Stand> {
        self.stands
            .iter()
            .filter(|s| !s.is_available())
            .cloned()
            .collect()
    }

    /// Fails with `Conflict` whenever the stand is occupied, even by the same company.
    pub fn assign_stand(&mut self, stand_number: &str, company_name: &str) -> Result<()> {
        let stand_idx = index_of(&self.stands, stand_number)?;
        let company = self.company(company_name)?.clone();
        self.stands[stand_idx].assign(&company)?;
        tracing::info!(
            "Assigned stand {} to {}",
            self.stands[stand_idx].number(),
            company.name()
        );
        Ok(())
    }

    pub fn unassign_stand(&mut self, stand_number: &str) -> Result<()> {
        let idx = index_of(&self.stands, stand_number)?;
        self.stands[idx].unassign();
        tracing::info!("Stand {} is available", self.stands[idx].number());
        Ok(())
    }

    // ---- visitors ----

    pub fn register_visitor(&mut self, visitor: Visitor) -> Result<()> {
        ensure_unique(&self.visitors, &visitor)?;
        tracing::info!("Registered visitor {}", visitor.id());
        self.visitors.push(visitor);
        Ok(())
    }

    pub fn list_visitors(&self) -> Vec<Visitor> {
        self.visitors.clone()
    }

    pub fn visitor(&self, id: &str) -> Result<&Visitor> {
        index_of(&self.visitors, id).map(|i| &self.visitors[i])
    }

    /// Name of the registered visitor with this id, if any.
    pub fn visitor_name(&self, id: &str) -> Option<String> {
        self.visitor(id).ok().map(|v| v.name().to_string())
    }

    pub fn edit_visitor(
        &mut self,
        id: &str,
        new_name: Option<&str>,
        new_email: Option<&str>,
    ) -> Result<()> {
        let idx = index_of(&self.visitors, id)?;
        let mut updated = self.visitors[idx].clone();
        if let Some(name) = provided(new_name) {
            updated.set_name(name)?;
        }
        if let Some(email) = provided(new_email) {
            updated.set_email(email)?;
        }
        tracing::debug!("Updated visitor {}", updated.id());
        self.visitors[idx] = updated;
        Ok(())
    }

    /// Removes the visitor and every comment they wrote, on every stand.
    pub fn delete_visitor(&mut self, id: &str) -> Result<()> {
        let idx = index_of(&self.visitors, id)?;
        let key = self.visitors[idx].key().clone();

        let removed: usize = self
            .stands
            .iter_mut()
            .map(|s| s.remove_comments_by(&key))
            .sum();

        self.visitors.remove(idx);
        tracing::info!("Deleted visitor {} ({} comment(s) removed)", key, removed);
        Ok(())
    }

    // ---- comments ----

    pub fn add_comment(
        &mut self,
        visitor_id: &str,
        stand_number: &str,
        rating: i32,
        text: &str,
    ) -> Result<()> {
        let rating = Rating::new(rating)?;
        let text = require_non_blank("comment text", text)?;

        let visitor_idx = index_of(&self.visitors, visitor_id)?;
        let stand_idx = index_of(&self.stands, stand_number)?;

        let comment = Comment::new(
            self.visitors[visitor_idx].id(),
            self.clock.today(),
            rating,
            &text,
        )?;
        tracing::debug!(
            "Visitor {} rated stand {} with {}",
            comment.visitor_id(),
            self.stands[stand_idx].number(),
            rating
        );
        self.stands[stand_idx].push_comment(comment);
        Ok(())
    }

    pub fn list_comments(&self, stand_number: &str) -> Result<Vec<Comment>> {
        Ok(self.stand(stand_number)?.comments().to_vec())
    }

    /// Mean rating of the stand, or `None` when nobody has rated it yet.
    pub fn average_rating(&self, stand_number: &str) -> Result<Option<f64>> {
        Ok(self.stand(stand_number)?.average_rating())
    }

    // Borrowed views for the report generators.

    pub(crate) fn iter_companies(&self) -> impl Iterator<Item = &Company> {
        self.companies.iter()
    }

    pub(crate) fn iter_stands(&self) -> impl Iterator<Item = &Stand> {
        self.stands.iter()
    }

    pub(crate) fn iter_visitors(&self) -> impl Iterator<Item = &Visitor> {
        self.visitors.iter()
    }
}
