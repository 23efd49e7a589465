pub mod chatdtos;
pub mod de;
pub mod jobdtos;
pub mod userdtos;
