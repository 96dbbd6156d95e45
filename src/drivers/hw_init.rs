//! One-shot hardware peripheral initialization.
//!
//! Configures the servo LEDC timer/channels and the DMX receive UART
//! using raw ESP-IDF sys calls. Called once from `main()` before the
//! control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    LedcTimerFailed(i32),
    LedcChannelFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LedcTimerFailed(rc) => write!(f, "LEDC timer config failed (rc={})", rc),
            Self::LedcChannelFailed(rc) => write!(f, "LEDC channel config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "DMX UART init failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals(channel_count: usize) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_servo_ledc(channel_count)?;
        init_dmx_uart()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_channel_count: usize) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Servo LEDC PWM ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_servo_ledc(channel_count: usize) -> Result<(), HwInitError> {
    // Timer 0: all servo channels share the 50 Hz, 14-bit frame timer.
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: pins::SERVO_PWM_RESOLUTION_BITS,
        freq_hz: pins::SERVO_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcTimerFailed(ret));
    }

    let count = channel_count.min(pins::SERVO_PWM_GPIOS.len());
    for (i, &gpio) in pins::SERVO_PWM_GPIOS.iter().take(count).enumerate() {
        let ret = unsafe {
            ledc_channel_config(&ledc_channel_config_t {
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel: ledc_channel_t_LEDC_CHANNEL_0 + i as u32,
                timer_sel: ledc_timer_t_LEDC_TIMER_0,
                gpio_num: gpio,
                duty: 0,
                hpoint: 0,
                ..Default::default()
            })
        };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcChannelFailed(ret));
        }
    }

    info!("hw_init: LEDC configured ({} servo channels @ 50 Hz)", count);
    Ok(())
}

/// Write a raw LEDC duty to a servo channel and latch it.
#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: usize, duty: u32) {
    // SAFETY: channel was configured in init_servo_ledc(); duty writes on
    // a configured channel are register accesses from main context only.
    unsafe {
        ledc_set_duty(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            ledc_channel_t_LEDC_CHANNEL_0 + channel as u32,
            duty,
        );
        ledc_update_duty(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            ledc_channel_t_LEDC_CHANNEL_0 + channel as u32,
        );
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: usize, _duty: u32) {}

// ── DMX UART ─────────────────────────────────────────────────

/// DMX-512: 250 kbaud, 8 data bits, 2 stop bits, no parity, RX only.
#[cfg(target_os = "espidf")]
unsafe fn init_dmx_uart() -> Result<(), HwInitError> {
    let uart_cfg = uart_config_t {
        baud_rate: pins::DMX_BAUD_RATE as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_2,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    let ret = unsafe { uart_param_config(pins::DMX_UART_NUM as i32, &uart_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartInitFailed(ret));
    }

    let ret = unsafe {
        uart_set_pin(
            pins::DMX_UART_NUM as i32,
            UART_PIN_NO_CHANGE,
            pins::DMX_UART_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartInitFailed(ret));
    }

    // RX buffer holds two full universes so a slow tick never drops a frame.
    let ret = unsafe {
        uart_driver_install(
            pins::DMX_UART_NUM as i32,
            2 * 513,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartInitFailed(ret));
    }

    info!("hw_init: DMX UART{} configured (250k 8N2, RX only)", pins::DMX_UART_NUM);
    Ok(())
}

/// Drain pending DMX bytes into `buf`; returns the count read.
/// Non-blocking — a zero timeout keeps the control tick bounded.
#[cfg(target_os = "espidf")]
pub fn dmx_uart_read(buf: &mut [u8]) -> usize {
    // SAFETY: driver installed in init_dmx_uart(); read from main context.
    let n = unsafe {
        uart_read_bytes(
            pins::DMX_UART_NUM as i32,
            buf.as_mut_ptr().cast(),
            buf.len() as u32,
            0,
        )
    };
    n.max(0) as usize
}

#[cfg(not(target_os = "espidf"))]
pub fn dmx_uart_read(_buf: &mut [u8]) -> usize {
    0
}
