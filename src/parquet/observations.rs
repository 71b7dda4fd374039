//! Save stored observations to a parquet file.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::Result;
use arrow::{
    array::{ArrayRef, Date32Array, Float64Array},
    record_batch::RecordBatch,
};
use chrono::{Datelike, NaiveDate};
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

use crate::observation::Observation;

pub fn save_observations(observations: &[Observation], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;

    let epoch_offset = NaiveDate::from_ymd_opt(1970, 1, 1)
        .expect("unix epoch is a valid date")
        .num_days_from_ce();

    let num_rows = observations.len();
    let mut dates = Vec::with_capacity(num_rows);
    let mut min_temps = Vec::with_capacity(num_rows);
    let mut max_temps = Vec::with_capacity(num_rows);
    let mut avg_temps = Vec::with_capacity(num_rows);

    for o in observations {
        dates.push(o.date.num_days_from_ce() - epoch_offset);
        min_temps.push(o.min_temp);
        max_temps.push(o.max_temp);
        avg_temps.push(o.avg_temp);
    }

    let columns: Vec<(&str, ArrayRef)> = vec![
        ("date", Arc::new(Date32Array::from(dates))),
        ("min_temp", Arc::new(Float64Array::from(min_temps))),
        ("max_temp", Arc::new(Float64Array::from(max_temps))),
        ("avg_temp", Arc::new(Float64Array::from(avg_temps))),
    ];
    let batch = RecordBatch::try_from_iter(columns)?;

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------
