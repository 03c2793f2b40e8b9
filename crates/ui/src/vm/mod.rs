mod worksheet_vm;

pub use worksheet_vm::{
    OptionStatus, OptionVm, StartPanelVm, TOKEN_PLACEHOLDER, TaskCardVm, WorksheetState,
    WorksheetVm, map_worksheet,
};
