use chrono::NaiveDate;
use wakens_core::booking::BookingSnapshot;

/// A rendered confirmation message, ready for the provider.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub subject: String,
    pub html: String,
}

fn long_date(date: NaiveDate) -> String {
    // e.g. "Tuesday, 25 November 2025"
    date.format("%A, %-d %B %Y").to_string()
}

/// The fixed confirmation template. Every booking gets the same layout with
/// guest, stay, and payment fields substituted in.
pub fn confirmation_email(snapshot: &BookingSnapshot) -> EmailMessage {
    let subject = format!(
        "Booking Confirmed - {} - {}",
        snapshot.booking_id, snapshot.hotel_name
    );

    let guest_label = if snapshot.guests > 1 { "Guests" } else { "Guest" };

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1>Booking Confirmed!</h1>
    <p>Your eco-friendly stay at WAKENS</p>
    <div style="background: #667eea; color: white; padding: 15px; text-align: center;">
      Booking ID: {booking_id}
    </div>
    <p>Dear <strong>{name}</strong>,</p>
    <p>Thank you for choosing an eco-friendly stay with us! Your booking has been successfully confirmed.</p>
    <h3>Booking Details</h3>
    <table>
      <tr><td>Hotel</td><td>{hotel_name}</td></tr>
      <tr><td>Room</td><td>{room_name}</td></tr>
      <tr><td>Check-in</td><td>{check_in}</td></tr>
      <tr><td>Check-out</td><td>{check_out}</td></tr>
      <tr><td>Guests</td><td>{guests} {guest_label}</td></tr>
    </table>
    <h3>Guest Information</h3>
    <table>
      <tr><td>Name</td><td>{name}</td></tr>
      <tr><td>Email</td><td>{email}</td></tr>
      <tr><td>Phone</td><td>{phone}</td></tr>
    </table>
    <h3>Payment Details</h3>
    <table>
      <tr><td>Payment Method</td><td>{payment_method}</td></tr>
      <tr><td>Total Amount</td><td>&#8377;{total_price}</td></tr>
      <tr><td>Payment Status</td><td>PAID</td></tr>
    </table>
    <p>Keep this email for your records and bring a valid photo ID at check-in.
    You can view live environmental metrics for your room on our website.</p>
    <p style="font-size: 12px; color: #666;">
      WAKENS - Eco-Friendly Stays, Erode, Tamil Nadu.
      Need help? Contact us at support@wakens.com.
    </p>
  </div>
</body>
</html>"#,
        booking_id = snapshot.booking_id,
        name = snapshot.guest.name,
        email = snapshot.guest.email,
        phone = snapshot.guest.phone,
        hotel_name = snapshot.hotel_name,
        room_name = snapshot.room_name,
        check_in = long_date(snapshot.check_in),
        check_out = long_date(snapshot.check_out),
        guests = snapshot.guests,
        guest_label = guest_label,
        payment_method = snapshot.payment_method,
        total_price = snapshot.total_price,
    );

    EmailMessage { subject, html }
}
