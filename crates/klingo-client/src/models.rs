//! Typed parameter sets for the heavier listing queries.
//!
//! Most convenience methods forward a handful of parameters inline; the two
//! queries below take a dozen-plus fields with platform-mandated defaults, so
//! they get explicit structures instead of free-form maps.

use chrono::{Local, NaiveDate};
use serde_json::{json, Value};

/// Parameters for the day-schedule listing (`agendas.index`).
///
/// Defaults reproduce what the platform's own frontend sends: all shifts,
/// all statuses, operating unit 1, booked and free slots alike.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleListParams {
    /// Schedule date; today when unset.
    pub date: Option<NaiveDate>,
    /// Practitioner id or name filter; empty matches all.
    pub practitioner: String,
    /// Specialty filter; empty matches all.
    pub specialty: String,
    /// Shift: `G` all, `M` morning, `T` afternoon, `N` evening.
    pub shift: String,
    /// Slot status: `T` all, `A` booked, `C` confirmed, ...
    pub status: String,
    /// Operating unit the schedule belongs to.
    pub operating_unit: u32,
    /// Only free slots.
    pub free_only: bool,
    /// Page number for server-side pagination.
    pub page: Option<u32>,
    /// Free-text search over the day's slots.
    pub search: Option<String>,
    /// Restrict to the schedule around one encounter.
    pub encounter_id: Option<i64>,
}

impl Default for ScheduleListParams {
    fn default() -> Self {
        Self {
            date: None,
            practitioner: String::new(),
            specialty: String::new(),
            shift: "G".to_string(),
            status: "T".to_string(),
            operating_unit: 1,
            free_only: false,
            page: None,
            search: None,
            encounter_id: None,
        }
    }
}

impl ScheduleListParams {
    /// Convert into the wire parameter map.
    #[must_use]
    pub fn to_parms(&self) -> Value {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        json!({
            "data": date.format("%Y-%m-%d").to_string(),
            "turno": self.shift,
            "medico": self.practitioner,
            "medicos": Value::Null,
            "group": "none",
            "livres": u8::from(self.free_only),
            "status": self.status,
            "especialidade": self.specialty,
            "unidade_operacao": self.operating_unit,
            "faixa_hora": "D",
            "recepcao": "",
            "page": self.page,
            "search": self.search,
            "view_status": "",
            "id_atendimento": self.encounter_id,
            "id_fila_laudo": "",
            "tipo_proced": "T",
            "editados": false,
        })
    }
}

/// Parameters for the stock-request listing (`estoque_solicitacoes.index`).
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRequestParams {
    /// Request status: `A` open, plus platform-defined states.
    pub status: String,
    /// Restrict to encounter-linked requests.
    pub encounter_scoped: bool,
    /// Free-text search.
    pub search: String,
    /// Page number.
    pub page: u32,
    /// Page size.
    pub size: u32,
}

impl Default for InventoryRequestParams {
    fn default() -> Self {
        Self {
            status: "A".to_string(),
            encounter_scoped: true,
            search: String::new(),
            page: 1,
            size: 100,
        }
    }
}

impl InventoryRequestParams {
    /// Convert into the wire parameter map.
    #[must_use]
    pub fn to_parms(&self) -> Value {
        json!({
            "atendimento": self.encounter_scoped,
            "classe": "",
            "status": self.status,
            "id_estoque_local": "",
            "inicio": "",
            "fim": "",
            "semana": "",
            "mes": "",
            "periodo": "s",
            "referencia": "",
            "tipo_mov": "",
            "search": self.search,
            "id_unidade_operacao": "",
            "id_centro_custo": "",
            "id_estoque_local_destino": "",
            "com_saldo": "T",
            "size": self.size,
            "page": self.page,
            "saldos": false,
            "atend_consolid": false,
        })
    }
}
