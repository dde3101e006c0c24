use crate::venue::{
    NOT_AVAILABLE, ServiceOffering, VenueCard, VenueRecord, VenueSummary, WEEKDAYS, WeeklySchedule,
};

/// Merges one venue's parts into a record. Services are not padded yet.
pub fn assemble(summary: VenueSummary, schedule: WeeklySchedule, services: Vec<ServiceOffering>) -> VenueRecord {
    VenueRecord {
        name: summary.name,
        address: summary.address,
        gender: summary.gender,
        rating: summary.rating,
        schedule,
        services,
    }
}

/// First pass of a run: records are collected as venues are scraped.
#[derive(Debug, Default)]
pub struct RecordBatch {
    records: Vec<VenueRecord>,
}

impl RecordBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: VenueCard, schedule: WeeklySchedule) {
        self.records
            .push(assemble(card.summary, schedule, card.services));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Second pass: pads every record to the widest service list in the batch.
    pub fn finalize(self) -> FinalizedBatch {
        let max_services = self
            .records
            .iter()
            .map(|r| r.services.len())
            .max()
            .unwrap_or(0);
        let with_gender = self.records.iter().any(|r| r.gender.is_some());

        let records = self
            .records
            .into_iter()
            .map(|mut record| {
                record.services.resize_with(max_services, || ServiceOffering {
                    service_name: NOT_AVAILABLE.to_string(),
                    price: NOT_AVAILABLE.to_string(),
                });
                record
            })
            .collect();

        FinalizedBatch {
            records,
            max_services,
            with_gender,
        }
    }
}

/// Records with a fixed column layout, ready for export.
#[derive(Debug, Clone)]
pub struct FinalizedBatch {
    records: Vec<VenueRecord>,
    max_services: usize,
    with_gender: bool,
}

impl FinalizedBatch {
    pub fn records(&self) -> &[VenueRecord] {
        &self.records
    }

    pub fn max_services(&self) -> usize {
        self.max_services
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Name, Address, [Gender], Rating, Monday..Sunday, then Service_i/Price_i pairs.
    pub fn column_order(&self) -> Vec<String> {
        let mut columns = vec!["Name".to_string(), "Address".to_string()];
        if self.with_gender {
            columns.push("Gender".to_string());
        }
        columns.push("Rating".to_string());
        columns.extend(WEEKDAYS.iter().map(|d| d.to_string()));
        for i in 1..=self.max_services {
            columns.push(format!("Service_{i}"));
            columns.push(format!("Price_{i}"));
        }
        columns
    }

    /// Cell text for each record, in [`column_order`](Self::column_order).
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| {
                let mut row = vec![record.name.clone(), record.address.clone()];
                if self.with_gender {
                    let gender = record.gender.map_or(NOT_AVAILABLE, |g| g.label());
                    row.push(gender.to_string());
                }
                row.push(record.rating.clone());
                row.extend(record.schedule.iter().map(|(_, hours)| hours.to_string()));
                for service in &record.services {
                    row.push(service.service_name.clone());
                    row.push(service.price.clone());
                }
                row
            })
            .collect()
    }
}
