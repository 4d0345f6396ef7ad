use std::borrow::Borrow;
use std::cell::RefCell;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use log::debug;

use crate::common::{Capacity, CompetitorName};
use crate::elimination::{EliminationResult, Method};
use crate::error::{EliminationError, Result};
use crate::reduction::EliminationNetwork;
use crate::standings::Standings;

/// Elimination queries over one division.
///
/// Keeps the result of the most recent query and reuses it while the same
/// competitor is asked about again. The cache makes a `Division` usable from one
/// thread at a time; to query from several threads, give each its own `Division`
/// over the same shared standings (see [`Division::from_shared`]).
#[derive(Debug)]
pub struct Division<T: CompetitorName> {
    standings: Arc<Standings<T>>,
    leader: Option<usize>,
    last: RefCell<Option<EliminationResult>>,
}

impl<T: CompetitorName> Division<T> {
    pub fn new(standings: Standings<T>) -> Self {
        Self::from_shared(Arc::new(standings))
    }
    pub fn from_shared(standings: Arc<Standings<T>>) -> Self {
        let leader = standings.leader();
        Division {
            standings,
            leader,
            last: RefCell::new(None),
        }
    }
    pub fn standings(&self) -> &Arc<Standings<T>> {
        &self.standings
    }
    pub fn number_of_competitors(&self) -> usize {
        self.standings.len()
    }
    pub fn competitors(&self) -> impl Iterator<Item = &T> + '_ {
        self.standings.names()
    }
    pub fn leader(&self) -> Option<&T> {
        self.leader.map(|i| self.standings.name(i))
    }
    pub fn wins<Q>(&self, name: &Q) -> Result<u32>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        Ok(self.standings.wins(self.id(name)?))
    }
    pub fn losses<Q>(&self, name: &Q) -> Result<u32>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        Ok(self.standings.losses(self.id(name)?))
    }
    pub fn remaining<Q>(&self, name: &Q) -> Result<u32>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        Ok(self.standings.remaining(self.id(name)?))
    }
    pub fn against<Q>(&self, name1: &Q, name2: &Q) -> Result<u32>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        Ok(self.standings.against(self.id(name1)?, self.id(name2)?))
    }
    pub fn is_eliminated<Q>(&self, name: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        Ok(self.solve(self.id(name)?)?.is_eliminated())
    }
    /// The competitors that together beat `name` out, or `None` if it can still finish first.
    pub fn certificate<Q>(&self, name: &Q) -> Result<Option<Vec<T>>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        Ok(self
            .solve(self.id(name)?)?
            .certificate_names(&self.standings))
    }
    pub fn elimination<Q>(&self, name: &Q) -> Result<EliminationResult>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.solve(self.id(name)?)
    }
    fn id<Q>(&self, name: &Q) -> Result<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.standings
            .index_of(name)
            .ok_or_else(|| EliminationError::UnknownCompetitor(name.to_string()))
    }
    fn solve(&self, id: usize) -> Result<EliminationResult> {
        if let Some(last) = self.last.borrow().as_ref().filter(|r| r.subject() == id) {
            debug!("reusing result for {}", self.standings.name(id));
            return Ok(last.clone());
        }
        let result = match self.trivial_elimination(id) {
            Some(result) => result,
            None => self.full_elimination(id)?,
        };
        debug!(
            "{} eliminated: {} ({:?})",
            self.standings.name(id),
            result.is_eliminated(),
            result.method()
        );
        *self.last.borrow_mut() = Some(result.clone());
        Ok(result)
    }
    // the leader's wins alone already top the best `id` can do
    fn trivial_elimination(&self, id: usize) -> Option<EliminationResult> {
        let leader = self.leader?;
        let beaten = leader != id
            && self.standings.best(id) < Capacity::from(self.standings.wins(leader));
        beaten.then(|| EliminationResult::eliminated(id, vec![leader], Method::Trivial))
    }
    fn full_elimination(&self, id: usize) -> Result<EliminationResult> {
        EliminationNetwork::build(&self.standings, id)?.solve()
    }
}
