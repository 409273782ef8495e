use std::fmt;

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct HitEntry {
    /// corpus index of the recommended item
    pub index: usize,
    pub title: String,
    pub score: f64,
}

/// Ranked recommendations, best first.
#[derive(Clone, PartialEq, Default)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn titles(&self) -> Vec<String> {
        self.list.iter().map(|hit| hit.title.clone()).collect()
    }
}

impl fmt::Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6} (#{})", hit.title, hit.score, hit.index)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl fmt::Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hit in &self.list {
            writeln!(f, "{:.6}\t{}", hit.score, hit.title)?;
        }
        Ok(())
    }
}
