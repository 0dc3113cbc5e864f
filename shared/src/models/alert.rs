//! Alert message composition
//!
//! Messages are plain text with emoji markers so they render the same over
//! SMS and in messaging apps.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::crop::Crop;
use super::region::RegionRecord;
use super::risk::{ActivityType, RiskLevel};

/// Sent by the "test gateway" action
pub const TEST_MESSAGE: &str = "🧪 Mensaje de prueba desde Utzk'aslem\n\n\
Si recibe este mensaje, la configuración del gateway SMS está funcionando correctamente.";

const BRAND: &str = "Utzk'aslem";

/// Render with exactly one decimal, rounding half away from zero
pub fn format_one_decimal(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}", rounded)
}

/// Render as a whole number, rounding half away from zero
pub fn format_whole(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    match rounded.to_i64() {
        Some(v) => v.to_string(),
        None => format!("{:.0}", rounded),
    }
}

/// Compose the alert for one region, crop and activity
pub fn compose_alert(region: &RegionRecord, crop: &Crop, activity: ActivityType) -> String {
    let risk = region.risk();
    let temperature = region
        .temperature_celsius()
        .map(format_one_decimal)
        .unwrap_or_else(|| "N/A".to_string());

    let mut message = format!("🌾 ALERTA AGRÍCOLA - {}\n\n", BRAND);
    message.push_str(&format!("📍 Departamento: {}\n", region.location_label()));
    message.push_str(&format!("🌱 Cultivo: {}\n", crop.label()));
    message.push_str(&format!("{} Nivel de Riesgo: {}\n", risk.icon(), risk.label_es()));
    message.push_str(&format!("🚜 Actividad: {}\n\n", activity.label_es()));
    message.push_str(&format!("🌡️ Temperatura: {}°C\n", temperature));
    message.push_str(&format!("💧 Lluvia: {} mm\n", format_one_decimal(region.rainfall_mm())));
    message.push_str(&format!("💨 Viento: {} km/h\n", format_one_decimal(region.wind_kph())));
    message.push_str(&format!(
        "💦 Humedad: {}%\n",
        format_whole(region.soil_moisture_percent())
    ));
    message.push('\n');
    message.push_str(&risk.tone_line(activity));

    message
}

/// Compose a country-wide summary listing every high-risk department
pub fn compose_summary(records: &[RegionRecord], crop: &Crop, activity: ActivityType) -> String {
    let high: Vec<&RegionRecord> = records
        .iter()
        .filter(|r| r.risk() == RiskLevel::High)
        .collect();

    let mut message;
    if high.is_empty() {
        message = format!("🌾 REPORTE AGRÍCOLA - {}\n\n", BRAND);
        message.push_str("✅ No hay departamentos con riesgo alto en este momento.\n\n");
        message.push_str(&format!("🌱 Cultivo: {}\n", crop.label()));
        message.push_str(&format!("🚜 Actividad: {}", activity.label_es()));
    } else {
        message = format!("🌾 ALERTA AGRÍCOLA - {}\n\n", BRAND);
        message.push_str(&format!(
            "⚠️ {} departamento(s) con RIESGO ALTO:\n\n",
            high.len()
        ));
        for region in high {
            message.push_str(&format!(
                "📍 {}: {} mm lluvia, {} km/h viento\n",
                region.name(),
                format_one_decimal(region.rainfall_mm()),
                format_one_decimal(region.wind_kph()),
            ));
        }
        message.push_str(&format!("\n🌱 Cultivo: {}\n", crop.label()));
        message.push_str(&format!("🚜 Actividad: {}", activity.label_es()));
    }

    message
}
