//! Parquet export of zonal statistics.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float64Array, Int32Array, Int64Array, RecordBatch, StringArray, UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use swbs_calendar::Season;
use tracing::info;

use crate::error::ExportError;
use crate::family::ExportFamily;
use crate::naming::OutputNames;
use crate::zonal::ZonalStatsTable;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    fn to_parquet(self) -> Result<parquet::basic::Compression, ExportError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => parquet::basic::Compression::ZSTD(parquet::basic::ZstdLevel::try_new(3)?),
        })
    }
}

/// Where and how to write one zonal-statistics table.
#[derive(Debug, Clone)]
pub struct TableExportRequest {
    names: OutputNames,
    output_dir: PathBuf,
    compression: Compression,
}

impl TableExportRequest {
    pub fn new(names: OutputNames, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            names,
            output_dir: output_dir.into(),
            compression: Compression::default(),
        }
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

/// Arrow schema for a zonal table; seasonal families add `season_name`.
pub(crate) fn build_schema(with_season: bool) -> Schema {
    let mut fields = vec![
        Field::new("zone", DataType::Int64, false),
        Field::new("year", DataType::Int32, true),
        Field::new("month", DataType::Int32, true),
        Field::new("count", DataType::UInt64, false),
        Field::new("sum", DataType::Float64, false),
        Field::new("mean", DataType::Float64, false),
        Field::new("min", DataType::Float64, false),
        Field::new("max", DataType::Float64, false),
    ];
    if with_season {
        fields.push(Field::new("season_name", DataType::Utf8, true));
    }
    Schema::new(fields)
}

fn to_record_batch(
    table: &ZonalStatsTable,
    schema: Arc<Schema>,
) -> Result<RecordBatch, ExportError> {
    let rows = table.rows();
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.zone))),
        Arc::new(Int32Array::from_iter(rows.iter().map(|r| r.year))),
        Arc::new(Int32Array::from_iter(rows.iter().map(|r| r.month.map(|m| m as i32)))),
        Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.count))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.sum))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.mean))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.min))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.max))),
    ];
    if schema.fields().len() > columns.len() {
        let names = rows
            .iter()
            .map(|r| r.month.and_then(|m| Season::from_start_month(m).ok()).map(Season::name));
        columns.push(Arc::new(StringArray::from_iter(names)));
    }
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Writes `table` to `{output_dir}/{table filename}` and returns the path.
///
/// Seasonal and mean-seasonal tables gain a `season_name` column
/// (`winter`, `spring`, `summer`, `fall`; null for other months).
///
/// # Errors
///
/// Returns [`ExportError::UnsupportedFamily`] for monthly summaries, with
/// nothing written, or a Parquet / I/O error from writing.
pub fn export_zonal_parquet(
    table: &ZonalStatsTable,
    request: &TableExportRequest,
) -> Result<PathBuf, ExportError> {
    let family = ExportFamily::from_basetype(request.names.recipe.basetype(), "Parquet")?;
    let schema = Arc::new(build_schema(family.is_seasonal()));
    let batch = to_record_batch(table, schema.clone())?;

    fs::create_dir_all(&request.output_dir)
        .map_err(|e| ExportError::io(&request.output_dir, e))?;
    let path = request.output_dir.join(request.names.table_filename());
    let file = fs::File::create(&path).map_err(|e| ExportError::io(&path, e))?;

    let props = WriterProperties::builder()
        .set_compression(request.compression.to_parquet()?)
        .build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    info!(
        path = %path.display(),
        family = family.name(),
        n_rows = table.len(),
        "exported zonal statistics"
    );
    Ok(path)
}
