//! Safety guidance shown when a risk zone is selected on the map.

use temis_risk_models::RiskTier;

const ALTO_GUIDANCE: &[&str] = &[
    "⛔ Evitar transitar solo/a después del anochecer",
    "🚖 Usar transporte autorizado y verificado",
    "💡 Mantenerse en áreas bien iluminadas",
    "📱 Informar a familiares de sus recorridos",
    "👥 Preferir caminar en grupo",
    "🔔 Estar alerta a comportamientos sospechosos",
];

const MEDIO_GUIDANCE: &[&str] = &[
    "👀 Mantener atención constante al entorno",
    "📵 Evitar distracciones con dispositivos móviles",
    "🛣️ Caminar por rutas principales y conocidas",
    "📞 Tener números de emergencia a mano",
    "🌙 Aumentar precauciones durante la noche",
    "🗺️ Planificar rutas seguras por adelantado",
];

const BAJO_GUIDANCE: &[&str] = &[
    "✅ Zona con menor incidencia delictiva",
    "👁️ Mantener precauciones básicas de seguridad",
    "🎒 Cuidar pertenencias en áreas públicas",
    "📋 Seguir recomendaciones generales de seguridad",
];

/// Returns the ordered guidance list for a tier.
///
/// The count-bearing line comes first for `alto` and `medio` and last for
/// `bajo`.
#[must_use]
pub fn recommendations(tier: RiskTier, crime_count: u64) -> Vec<String> {
    let plural = if crime_count > 1 { "s" } else { "" };

    match tier {
        RiskTier::Alto => {
            let mut lines = vec![format!(
                "🚨 Zona de ALTO RIESGO con {crime_count} reporte{plural}"
            )];
            lines.extend(ALTO_GUIDANCE.iter().map(ToString::to_string));
            lines
        }
        RiskTier::Medio => {
            let mut lines = vec![format!("⚠️ Zona con {crime_count} incidentes reportados")];
            lines.extend(MEDIO_GUIDANCE.iter().map(ToString::to_string));
            lines
        }
        RiskTier::Bajo => {
            let mut lines: Vec<String> = BAJO_GUIDANCE.iter().map(ToString::to_string).collect();
            lines.push(format!(
                "📊 Se han registrado {crime_count} reporte{plural} en esta zona"
            ));
            lines
        }
    }
}

/// Same as [`recommendations`] for a tier name; unknown names get the
/// `bajo` list.
#[must_use]
pub fn recommendations_for(tier_name: &str, crime_count: u64) -> Vec<String> {
    recommendations(RiskTier::from_name_or_bajo(tier_name), crime_count)
}
