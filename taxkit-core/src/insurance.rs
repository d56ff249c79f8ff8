//! Four major social insurance premiums (4대보험), 2026 rates.

use serde::Serialize;

use crate::money::{format_krw, round_won};

/// Contribution rates borne by one side of the employment contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideRates {
    pub pension: f64,
    pub health: f64,
    pub employment: f64,
}

/// 국민연금 9.5%, 건강보험 7.19%, 고용보험 1.8%, each split evenly.
pub const EMPLOYEE_RATES: SideRates = SideRates {
    pension: 0.0475,
    health: 0.03595,
    employment: 0.009,
};
pub const EMPLOYER_RATES: SideRates = SideRates {
    pension: 0.0475,
    health: 0.03595,
    employment: 0.009,
};

/// 장기요양보험 as a share of the health premium.
pub const LONG_TERM_CARE_RATE: f64 = 0.1314;

/// 기준소득월액 floor and ceiling for the pension premium.
pub const PENSION_BASE_MIN: i64 = 370_000;
pub const PENSION_BASE_MAX: i64 = 6_170_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Employee,
    Employer,
}

impl Side {
    pub fn rates(self) -> SideRates {
        match self {
            Side::Employee => EMPLOYEE_RATES,
            Side::Employer => EMPLOYER_RATES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsurancePortion {
    #[serde(rename = "국민연금")]
    pub pension_label: String,
    #[serde(rename = "건강보험")]
    pub health_label: String,
    #[serde(rename = "장기요양보험")]
    pub long_term_care_label: String,
    #[serde(rename = "고용보험")]
    pub employment_label: String,
    #[serde(rename = "합계")]
    pub total_label: String,
    pub pension: i64,
    pub health: i64,
    #[serde(rename = "longTermCare")]
    pub long_term_care: i64,
    pub employment: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsuranceResult {
    #[serde(rename = "월보수액")]
    pub salary_label: String,
    pub salary: i64,
    #[serde(rename = "근로자부담")]
    pub employee_label: InsurancePortion,
    #[serde(rename = "사업주부담")]
    pub employer_label: InsurancePortion,
    pub employee: InsurancePortion,
    pub employer: InsurancePortion,
    #[serde(rename = "총합계")]
    pub grand_total_label: String,
    #[serde(rename = "grandTotal")]
    pub grand_total: i64,
}

pub fn calculate_portion(salary: i64, side: Side) -> InsurancePortion {
    let rates = side.rates();
    let pension_base = salary.clamp(PENSION_BASE_MIN, PENSION_BASE_MAX);
    let pension = round_won(pension_base as f64 * rates.pension);
    let health = round_won(salary as f64 * rates.health);
    let long_term_care = round_won(health as f64 * LONG_TERM_CARE_RATE);
    let employment = round_won(salary as f64 * rates.employment);
    let total = pension + health + long_term_care + employment;

    InsurancePortion {
        pension_label: format_krw(pension),
        health_label: format_krw(health),
        long_term_care_label: format_krw(long_term_care),
        employment_label: format_krw(employment),
        total_label: format_krw(total),
        pension,
        health,
        long_term_care,
        employment,
        total,
    }
}

pub fn calculate_insurance(salary: i64) -> InsuranceResult {
    let employee = calculate_portion(salary, Side::Employee);
    let employer = calculate_portion(salary, Side::Employer);
    let grand_total = employee.total + employer.total;

    InsuranceResult {
        salary_label: format_krw(salary),
        salary,
        employee_label: employee.clone(),
        employer_label: employer.clone(),
        employee,
        employer,
        grand_total_label: format_krw(grand_total),
        grand_total,
    }
}
