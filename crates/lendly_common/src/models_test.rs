#[cfg(test)]
mod tests {
    use crate::models::{Booking, BookingStatus};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(BookingStatus::from("confirmed"), BookingStatus::Confirmed);
        assert_eq!(BookingStatus::from("Canceled"), BookingStatus::Cancelled);
        assert_eq!(
            BookingStatus::from("awaiting-payment"),
            BookingStatus::Other("awaiting-payment".to_string())
        );
        assert_eq!(BookingStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn test_only_cancelled_and_rejected_release_dates() {
        assert!(BookingStatus::Pending.is_occupying());
        assert!(BookingStatus::Confirmed.is_occupying());
        assert!(BookingStatus::Completed.is_occupying());
        assert!(BookingStatus::Other("on-hold".to_string()).is_occupying());
        assert!(!BookingStatus::Cancelled.is_occupying());
        assert!(!BookingStatus::Rejected.is_occupying());
    }

    #[test]
    fn test_booking_record_deserializes_from_stored_json() {
        let raw = r#"{
            "id": "b-1",
            "itemId": "drill-7",
            "startDate": "2024-06-10",
            "endDate": "2024-06-12",
            "status": "confirmed"
        }"#;
        let booking: Booking = serde_json::from_str(raw).expect("valid booking json");
        assert_eq!(booking.item_id, "drill-7");
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert!(booking.renter_id.is_none());

        assert!(booking.covers(date("2024-06-10")));
        assert!(booking.covers(date("2024-06-12")));
        assert!(!booking.covers(date("2024-06-13")));

        let json = serde_json::to_value(&booking).expect("serializable");
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["startDate"], "2024-06-10");
    }

    #[test]
    fn test_cancelled_booking_covers_but_does_not_occupy() {
        let booking = Booking {
            id: "b-2".to_string(),
            item_id: "tent".to_string(),
            renter_id: None,
            start_date: date("2024-06-10"),
            end_date: date("2024-06-12"),
            status: BookingStatus::Cancelled,
            notes: None,
            created_at: None,
        };
        assert!(booking.covers(date("2024-06-11")));
        assert!(!booking.occupies(date("2024-06-11")));
    }
}
