use crate::common::CompetitorName;
use crate::standings::Standings;

/// Which check decided a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// A single competitor already has more wins than the subject can reach.
    Trivial,
    MaxFlow,
}

/// The elimination status of one competitor (the subject), with the
/// certificate of elimination when there is one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EliminationResult {
    subject: usize,
    certificate: Option<Vec<usize>>,
    method: Method,
}

impl EliminationResult {
    pub fn contending(subject: usize, method: Method) -> Self {
        EliminationResult {
            subject,
            certificate: None,
            method,
        }
    }
    pub fn eliminated(subject: usize, certificate: Vec<usize>, method: Method) -> Self {
        debug_assert!(!certificate.is_empty());
        EliminationResult {
            subject,
            certificate: Some(certificate),
            method,
        }
    }
    pub fn subject(&self) -> usize {
        self.subject
    }
    pub fn is_eliminated(&self) -> bool {
        self.certificate.is_some()
    }
    /// Indices of the competitors that together beat the subject out.
    pub fn certificate(&self) -> Option<&[usize]> {
        self.certificate.as_deref()
    }
    pub fn method(&self) -> Method {
        self.method
    }
    pub fn certificate_names<T: CompetitorName>(&self, standings: &Standings<T>) -> Option<Vec<T>> {
        self.certificate
            .as_ref()
            .map(|ids| ids.iter().map(|&i| standings.name(i).clone()).collect())
    }
}
