use assessment_domain::{FormData, Section, Status};

/// Per-status instance counts shown on the summary dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub ok: usize,
    pub not_ok: usize,
    pub not_applicable: usize,
    pub not_filled: usize,
    pub total: usize,
}

impl StatusTally {
    pub fn record(&mut self, status: Option<Status>) {
        self.total += 1;
        match status {
            Some(Status::Ok) => self.ok += 1,
            Some(Status::NotOk) => self.not_ok += 1,
            Some(Status::NotApplicable) => self.not_applicable += 1,
            None => self.not_filled += 1,
        }
    }

    pub fn filled(&self) -> usize {
        self.total - self.not_filled
    }

    /// Percentage of instances with a status, rounded down.
    pub fn completion_percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        self.filled() * 100 / self.total
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn tally(form: &FormData) -> StatusTally {
        let mut tally = StatusTally::default();
        for instance in form.instances() {
            tally.record(instance.status);
        }
        tally
    }

    pub fn tally_section(section: &Section) -> StatusTally {
        let mut tally = StatusTally::default();
        for instance in section.instances() {
            tally.record(instance.status);
        }
        tally
    }

    pub fn per_section(form: &FormData) -> Vec<StatusTally> {
        form.sections
            .iter()
            .map(|section| Self::tally_section(section))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormStore, InstanceCoord};

    #[test]
    fn tally_counts_every_instance_once() {
        let mut store = FormStore::default();
        let item = store.resolve_item("1.1").unwrap();
        store.add_instance(item).unwrap();
        store.set_instance_status(item.instance(0), Status::Ok).unwrap();
        store.set_instance_status(item.instance(1), Status::NotOk).unwrap();
        store
            .set_instance_status(InstanceCoord::new(5, 0, 0), Status::NotApplicable)
            .unwrap();

        let tally = SummaryService::tally(store.form());
        assert_eq!(tally.total, 38);
        assert_eq!(tally.ok, 1);
        assert_eq!(tally.not_ok, 1);
        assert_eq!(tally.not_applicable, 1);
        assert_eq!(tally.not_filled, 35);

        let sections = SummaryService::per_section(store.form());
        assert_eq!(sections[0].total, 9);
        assert_eq!(sections[5].not_applicable, 1);
    }

    #[test]
    fn completion_percent_handles_empty_tally() {
        assert_eq!(StatusTally::default().completion_percent(), 100);
    }
}
