/// Reed-Solomon error correction for QR codes
/// Syndromes, Berlekamp-Massey error locator, Chien search and Forney values.
/// Codewords are stored highest degree first; generator roots are alpha^0..alpha^(n-1).
use crate::utils::Gf256;

/// Reed-Solomon decoder for QR codes
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks with `num_ecc_codewords` EC codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` in place; returns the number of corrected codewords.
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, &'static str> {
        let n = received.len();
        if n > 255 || n <= self.num_ecc_codewords {
            return Err("Invalid block length");
        }

        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == Gf256::ZERO) {
            return Ok(0);
        }

        let sigma = Self::find_error_locator(&syndrome);
        let num_errors = sigma.len() - 1;
        if num_errors == 0 || 2 * num_errors > self.num_ecc_codewords {
            return Err("Too many errors");
        }

        let error_positions = Self::find_error_positions(&sigma, n)?;
        let error_values = Self::find_error_values(&sigma, &syndrome, &error_positions, n)?;

        for (&pos, &value) in error_positions.iter().zip(&error_values) {
            received[pos] ^= value.value();
        }

        if self
            .calculate_syndrome(received)
            .iter()
            .any(|&s| s != Gf256::ZERO)
        {
            return Err("Uncorrectable error");
        }

        Ok(error_positions.len())
    }

    fn calculate_syndrome(&self, received: &[u8]) -> Vec<Gf256> {
        (0..self.num_ecc_codewords)
            .map(|i| {
                let x = Gf256::exp(i);
                received
                    .iter()
                    .fold(Gf256::ZERO, |acc, &c| acc * x + Gf256::new(c))
            })
            .collect()
    }

    // Berlekamp-Massey
    fn find_error_locator(syndrome: &[Gf256]) -> Vec<Gf256> {
        let mut sigma = vec![Gf256::ONE];
        let mut b = vec![Gf256::ONE];
        let mut delta_b = Gf256::ONE;
        let mut l = 0;
        let mut m = 1;

        for i in 0..syndrome.len() {
            let mut delta = syndrome[i];
            for j in 1..=l.min(sigma.len() - 1) {
                delta += sigma[j] * syndrome[i - j];
            }

            if delta == Gf256::ZERO {
                m += 1;
                continue;
            }

            let d = delta.checked_div(delta_b).unwrap_or(Gf256::ZERO);
            let previous = (2 * l <= i).then(|| sigma.clone());

            if sigma.len() < b.len() + m {
                sigma.resize(b.len() + m, Gf256::ZERO);
            }
            // sigma = sigma - d * x^m * b
            for (j, &coeff) in b.iter().enumerate() {
                sigma[j + m] += d * coeff;
            }

            match previous {
                Some(previous) => {
                    b = previous;
                    delta_b = delta;
                    l = i + 1 - l;
                    m = 1;
                }
                None => m += 1,
            }
        }

        while sigma.len() > 1 && sigma.last() == Some(&Gf256::ZERO) {
            sigma.pop();
        }
        sigma
    }

    /// alpha^-(n-1-pos): the root of sigma for an error at `pos`
    fn inverse_locator(pos: usize, n: usize) -> Gf256 {
        Gf256::exp(255 - (n - 1 - pos) % 255)
    }

    fn evaluate(poly: &[Gf256], x: Gf256) -> Gf256 {
        poly.iter().rev().fold(Gf256::ZERO, |acc, &c| acc * x + c)
    }

    // Chien search
    fn find_error_positions(sigma: &[Gf256], n: usize) -> Result<Vec<usize>, &'static str> {
        let positions: Vec<usize> = (0..n)
            .filter(|&pos| Self::evaluate(sigma, Self::inverse_locator(pos, n)) == Gf256::ZERO)
            .collect();

        if positions.len() != sigma.len() - 1 {
            return Err("Wrong number of error positions found");
        }
        Ok(positions)
    }

    // Forney: e_k = X_k * omega(X_k^-1) / sigma'(X_k^-1)
    fn find_error_values(
        sigma: &[Gf256],
        syndrome: &[Gf256],
        error_positions: &[usize],
        n: usize,
    ) -> Result<Vec<Gf256>, &'static str> {
        // omega = syndrome * sigma mod x^(2t)
        let omega: Vec<Gf256> = (0..syndrome.len())
            .map(|i| {
                (0..=i.min(sigma.len() - 1))
                    .fold(Gf256::ZERO, |acc, j| acc + sigma[j] * syndrome[i - j])
            })
            .collect();

        // Formal derivative: only odd powers survive in characteristic 2
        let sigma_prime: Vec<Gf256> = sigma
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { Gf256::ZERO })
            .collect();

        error_positions
            .iter()
            .map(|&pos| {
                let x_inv = Self::inverse_locator(pos, n);
                let denominator = Self::evaluate(&sigma_prime, x_inv);
                let x_k = Gf256::exp((n - 1 - pos) % 255);
                Self::evaluate(&omega, x_inv)
                    .checked_div(denominator)
                    .map(|v| x_k * v)
                    .ok_or("Sigma derivative is zero")
            })
            .collect()
    }
}
