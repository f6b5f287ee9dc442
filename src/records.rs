//! Plain business records owned by the store, plus the starter catalog a new
//! site opens with.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    Sedan,
    Suv,
    Truck,
    Motorbike,
    Tricycle,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleType::Sedan => write!(f, "Sedan/Taxi"),
            VehicleType::Suv => write!(f, "SUV/4x4"),
            VehicleType::Truck => write!(f, "Truck/Bus"),
            VehicleType::Motorbike => write!(f, "Motorbike"),
            VehicleType::Tricycle => write!(f, "Pragya/Aboboyaa"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    Exterior,
    Interior,
    Full,
    Special,
}

/// A wash package on the price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Price in the site currency.
    pub price: f64,
    pub category: ServiceCategory,
    pub duration_mins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub vehicle_plate: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub loyalty_points: u32,
    pub last_visit: DateTime<Utc>,
}

impl Customer {
    pub fn new(id: String, name: String, phone: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            phone,
            vehicle_plate: None,
            vehicle_type: None,
            loyalty_points: 0,
            last_visit: now,
        }
    }

    /// Directory search: name and plate match case-insensitively, phone
    /// matches as typed. A blank term matches everyone.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let lower = term.to_lowercase();
        self.name.to_lowercase().contains(&lower)
            || self.phone.contains(term)
            || self
                .vehicle_plate
                .as_deref()
                .is_some_and(|plate| plate.to_lowercase().contains(&lower))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Attendant,
    Manager,
    Cashier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerStatus {
    Active,
    /// Invited but has not yet accepted.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    pub status: WorkerStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Fuel,
    Soap,
    Utility,
    Salary,
    Maintenance,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

fn service(id: &str, name: &str, price: f64, category: ServiceCategory, mins: u32) -> Service {
    Service {
        id: id.into(),
        name: name.into(),
        price,
        category,
        duration_mins: mins,
    }
}

fn worker(id: &str, name: &str, role: Role, email: &str) -> Worker {
    Worker {
        id: id.into(),
        name: name.into(),
        email: Some(email.into()),
        role,
        status: WorkerStatus::Active,
    }
}

pub fn starter_services() -> Vec<Service> {
    use ServiceCategory::*;
    vec![
        service("s1", "Express Wash", 20.0, Exterior, 15),
        service("s2", "Standard Full", 40.0, Full, 45),
        service("s3", "Executive Wash", 70.0, Full, 60),
        service("s4", "Engine Wash", 50.0, Special, 30),
        service("s5", "Interior Detail", 100.0, Interior, 90),
        service("s6", "Under Wash", 30.0, Exterior, 20),
        service("s7", "Body Polish", 80.0, Special, 45),
    ]
}

pub fn starter_workers() -> Vec<Worker> {
    vec![
        worker("w1", "Kwame A.", Role::Attendant, "kwame@washbay.com"),
        worker("w2", "Emmanuel O.", Role::Attendant, "emmanuel@washbay.com"),
        worker("w3", "Kojo Mensah", Role::Manager, "kojo@washbay.com"),
        worker("w4", "Sarah B.", Role::Cashier, "sarah@washbay.com"),
    ]
}

pub fn starter_customers() -> Vec<Customer> {
    let visit = |y, m, d| {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or_default()
    };
    vec![
        Customer {
            id: "c1".into(),
            name: "John Doe".into(),
            phone: "0244123456".into(),
            vehicle_plate: Some("GT-2023-21".into()),
            vehicle_type: Some(VehicleType::Suv),
            loyalty_points: 25,
            last_visit: visit(2023, 10, 1),
        },
        Customer {
            id: "c2".into(),
            name: "Ama Serwaa".into(),
            phone: "0509988776".into(),
            vehicle_plate: Some("AS-5500-22".into()),
            vehicle_type: Some(VehicleType::Sedan),
            loyalty_points: 8,
            last_visit: visit(2023, 10, 5),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ama() -> Customer {
        starter_customers().remove(1)
    }

    #[test]
    fn customer_search_by_name_phone_and_plate() {
        let c = ama();
        assert!(c.matches("serwaa"));
        assert!(c.matches("0509"));
        assert!(c.matches("as-5500"));
        assert!(c.matches("   "));
        assert!(!c.matches("kofi"));
    }

    #[test]
    fn customer_without_plate_only_matches_name_or_phone() {
        let c = Customer::new(
            "c9".into(),
            "New Customer".into(),
            "0201112222".into(),
            Utc::now(),
        );
        assert!(c.matches("0201"));
        assert!(!c.matches("gt-"));
    }

    #[test]
    fn starter_catalog_shape() {
        assert_eq!(starter_services().len(), 7);
        assert_eq!(starter_workers().len(), 4);
        let customers = starter_customers();
        assert_eq!(customers[0].loyalty_points, 25);
        assert_eq!(customers[0].last_visit.date_naive().to_string(), "2023-10-01");
    }

    #[test]
    fn vehicle_type_display() {
        assert_eq!(VehicleType::Suv.to_string(), "SUV/4x4");
        assert_eq!(VehicleType::Tricycle.to_string(), "Pragya/Aboboyaa");
    }
}
