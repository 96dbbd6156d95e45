//! Hobby servo driver (LEDC PWM, one channel per servo).
//!
//! Maps an angle command (0–180°) to a pulse width on the standard
//! 50 Hz servo frame, then to a 14-bit LEDC duty. Pulse endpoints match
//! the Arduino Servo library defaults (544–2400 µs), which the switch
//! linkages in the field were trimmed against.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real LEDC duty via hw_init helpers.
//! On host/test: tracks last commanded angles in-memory only.

use crate::config::MAX_CHANNELS;
use crate::drivers::hw_init;
use crate::pins;

pub struct ServoDriver {
    angles: [u8; MAX_CHANNELS],
    count: usize,
}

impl ServoDriver {
    pub fn new(channel_count: usize) -> Self {
        Self {
            angles: [0; MAX_CHANNELS],
            count: channel_count.min(MAX_CHANNELS),
        }
    }

    /// Command `channel` to `degrees`, clamped to 0–180.
    /// Out-of-range channels are ignored.
    pub fn write(&mut self, channel: usize, degrees: u8) {
        if channel >= self.count {
            return;
        }
        let degrees = degrees.min(180);
        hw_init::ledc_set(channel, Self::angle_to_duty(degrees));
        self.angles[channel] = degrees;
    }

    /// Last commanded angle, or `None` for an unmanaged channel.
    pub fn angle(&self, channel: usize) -> Option<u8> {
        if channel < self.count {
            Some(self.angles[channel])
        } else {
            None
        }
    }

    pub fn channel_count(&self) -> usize {
        self.count
    }

    fn angle_to_pulse_us(degrees: u8) -> u32 {
        let span = pins::SERVO_MAX_PULSE_US - pins::SERVO_MIN_PULSE_US;
        pins::SERVO_MIN_PULSE_US + span * u32::from(degrees) / 180
    }

    fn angle_to_duty(degrees: u8) -> u32 {
        let max_duty = (1u32 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;
        Self::angle_to_pulse_us(degrees) * max_duty / pins::SERVO_PWM_PERIOD_US
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_endpoints_match_arduino_defaults() {
        assert_eq!(ServoDriver::angle_to_pulse_us(0), 544);
        assert_eq!(ServoDriver::angle_to_pulse_us(180), 2400);
    }

    #[test]
    fn neutral_pulse_is_centred() {
        let mid = ServoDriver::angle_to_pulse_us(90);
        assert!((1400..=1550).contains(&mid), "got {mid}");
    }

    #[test]
    fn duty_fits_resolution() {
        let max_duty = (1u32 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;
        for deg in [0u8, 90, 180] {
            assert!(ServoDriver::angle_to_duty(deg) < max_duty);
        }
    }

    #[test]
    fn write_clamps_angle_and_tracks_state() {
        let mut servo = ServoDriver::new(3);
        servo.write(1, 200);
        assert_eq!(servo.angle(1), Some(180));
        assert_eq!(servo.angle(0), Some(0));
    }

    #[test]
    fn write_ignores_unmanaged_channel() {
        let mut servo = ServoDriver::new(2);
        servo.write(5, 90);
        assert_eq!(servo.angle(5), None);
    }
}
