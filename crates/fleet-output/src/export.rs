//! Post-run export of an orchestrator's logs.

use log::info;

use fleet_sim::FleetOrchestrator;
use fleet_spatial::Router;

use crate::writer::TableWriter;
use crate::OutputResult;

/// Write the fleet's telemetry and anomaly logs as tables, then finish the
/// writer.
pub fn write_tables<R, W>(fleet: &FleetOrchestrator<R>, writer: &mut W) -> OutputResult<()>
where
    R: Router,
    W: TableWriter,
{
    let telemetry = fleet.telemetry_table();
    let anomalies = fleet.anomaly_table();
    writer.write_telemetry(&telemetry)?;
    writer.write_anomalies(&anomalies)?;
    writer.finish()?;
    info!("exported {} telemetry rows, {} anomaly rows", telemetry.len(), anomalies.len());
    Ok(())
}
