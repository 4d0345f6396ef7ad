use std::borrow::Borrow;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;
use std::str::FromStr;

use crate::common::{Capacity, CompetitorName};
use crate::error::{EliminationError, Result};

/// One line of the standings table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record<T> {
    pub name: T,
    pub wins: u32,
    pub losses: u32,
    pub remaining: u32,
    // games left against every competitor, in table order
    pub against: Vec<u32>,
}

/// Validated, immutable division standings.
#[derive(Clone, Debug)]
pub struct Standings<T: CompetitorName> {
    index: HashMap<T, usize>,
    records: Vec<Record<T>>,
}

fn malformed(message: String) -> EliminationError {
    EliminationError::MalformedStandings(message)
}

impl<T: CompetitorName> Standings<T> {
    pub fn new(records: Vec<Record<T>>) -> Result<Self> {
        let n = records.len();
        let mut index = HashMap::with_capacity(n);
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.name.clone(), i).is_some() {
                return Err(malformed(format!("duplicate competitor {}", record.name)));
            }
            if record.against.len() != n {
                return Err(malformed(format!(
                    "{} has games left against {} competitors, expected {}",
                    record.name,
                    record.against.len(),
                    n
                )));
            }
            if record.against[i] != 0 {
                return Err(malformed(format!(
                    "{} has {} games left against itself",
                    record.name, record.against[i]
                )));
            }
            let scheduled: u64 = record.against.iter().map(|&g| u64::from(g)).sum();
            if scheduled != u64::from(record.remaining) {
                return Err(malformed(format!(
                    "{} has {} remaining games but {} scheduled",
                    record.name, record.remaining, scheduled
                )));
            }
        }
        for i in 0..n {
            for j in i + 1..n {
                if records[i].against[j] != records[j].against[i] {
                    return Err(malformed(format!(
                        "{} lists {} games against {} but {} lists {}",
                        records[i].name,
                        records[i].against[j],
                        records[j].name,
                        records[j].name,
                        records[j].against[i]
                    )));
                }
            }
        }
        Ok(Standings { index, records })
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn index_of<Q>(&self, name: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(name).copied()
    }
    pub fn names(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.iter().map(|record| &record.name)
    }
    pub fn name(&self, i: usize) -> &T {
        &self.records[i].name
    }
    pub fn wins(&self, i: usize) -> u32 {
        self.records[i].wins
    }
    pub fn losses(&self, i: usize) -> u32 {
        self.records[i].losses
    }
    pub fn remaining(&self, i: usize) -> u32 {
        self.records[i].remaining
    }
    pub fn against(&self, i: usize, j: usize) -> u32 {
        self.records[i].against[j]
    }
    /// The most wins competitor `i` can finish the season with.
    pub fn best(&self, i: usize) -> Capacity {
        Capacity::from(self.wins(i)) + Capacity::from(self.remaining(i))
    }
    /// The competitor with the most wins so far. Ties go to the earliest in the table.
    pub fn leader(&self) -> Option<usize> {
        (0..self.len()).min_by_key(|&i| Reverse(self.wins(i)))
    }
    /// Checks that `subset` proves `target` eliminated: the subset's current wins plus
    /// the games still to be played among its members exceed `best(target)` on average.
    pub fn certifies(&self, subset: &[usize], target: usize) -> bool {
        if subset.is_empty() || subset.contains(&target) {
            return false;
        }
        let wins: Capacity = subset.iter().map(|&i| Capacity::from(self.wins(i))).sum();
        let games: Capacity = subset
            .iter()
            .enumerate()
            .flat_map(|(k, &i)| subset[k + 1..].iter().map(move |&j| (i, j)))
            .map(|(i, j)| Capacity::from(self.against(i, j)))
            .sum();
        wins + games > self.best(target) * subset.len() as Capacity
    }
}

impl Standings<String> {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        std::fs::read_to_string(path)?.parse()
    }
}

fn next_number<'a, N: FromStr, I: Iterator<Item = &'a str>>(
    tokens: &mut I,
    what: &str,
) -> Result<N> {
    let token = tokens
        .next()
        .ok_or_else(|| malformed(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| malformed(format!("expected {what}, found {token:?}")))
}

impl FromStr for Standings<String> {
    type Err = EliminationError;

    // N, then per competitor: name wins losses remaining g_0 .. g_{N-1}
    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        let n: usize = next_number(&mut tokens, "number of competitors")?;
        // the count is untrusted, so records grow as they are read
        let mut records = Vec::new();
        for _ in 0..n {
            let name = tokens
                .next()
                .ok_or_else(|| malformed(format!("expected {n} competitors, found {}", records.len())))?
                .to_owned();
            let wins = next_number(&mut tokens, &format!("wins of {name}"))?;
            let losses = next_number(&mut tokens, &format!("losses of {name}"))?;
            let remaining = next_number(&mut tokens, &format!("remaining games of {name}"))?;
            let against = (0..n)
                .map(|j| next_number(&mut tokens, &format!("games left between {name} and #{j}")))
                .collect::<Result<Vec<u32>>>()?;
            records.push(Record {
                name,
                wins,
                losses,
                remaining,
                against,
            });
        }
        if let Some(token) = tokens.next() {
            return Err(malformed(format!("unexpected trailing token {token:?}")));
        }
        Standings::new(records)
    }
}
