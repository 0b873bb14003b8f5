use std::ffi::CString;
use std::mem::MaybeUninit;

use tracing::warn;

use crate::{ObjSense, Retcode, RowSpec, Status, VarSpec, VarType, ffi, scip_call};

/// Owns one SCIP instance together with the variables and constraints created on it.
///
/// Dropping it releases every captured variable and constraint and then frees the
/// instance, so a model never outlives the call that built it.
#[derive(Debug)]
pub(crate) struct ScipPtr {
    raw: *mut ffi::SCIP,
    vars: Vec<*mut ffi::SCIP_VAR>,
    conss: Vec<*mut ffi::SCIP_CONS>,
}

impl ScipPtr {
    pub(crate) fn new() -> Result<Self, Retcode> {
        let mut scip_ptr = MaybeUninit::uninit();
        scip_call!(ffi::SCIPcreate(scip_ptr.as_mut_ptr()));
        let raw = unsafe { scip_ptr.assume_init() };
        Ok(ScipPtr {
            raw,
            vars: Vec::new(),
            conss: Vec::new(),
        })
    }

    pub(crate) fn include_default_plugins(&self) -> Result<(), Retcode> {
        scip_call!(ffi::SCIPincludeDefaultPlugins(self.raw));
        Ok(())
    }

    pub(crate) fn create_prob(&self, name: &str) -> Result<(), Retcode> {
        let name = c_name(name)?;
        scip_call!(ffi::SCIPcreateProbBasic(self.raw, name.as_ptr()));
        Ok(())
    }

    pub(crate) fn hide_output(&self) {
        unsafe { ffi::SCIPsetMessagehdlrQuiet(self.raw, true.into()) };
    }

    pub(crate) fn set_int_param(&self, param: &str, value: i32) -> Result<(), Retcode> {
        let param = c_name(param)?;
        scip_call! { ffi::SCIPsetIntParam(self.raw, param.as_ptr(), value) };
        Ok(())
    }

    pub(crate) fn set_real_param(&self, param: &str, value: f64) -> Result<(), Retcode> {
        let param = c_name(param)?;
        scip_call! { ffi::SCIPsetRealParam(self.raw, param.as_ptr(), value) };
        Ok(())
    }

    /// Switches off every component that could change the LP before it is solved,
    /// so that dual values refer to the rows exactly as they were added.
    pub(crate) fn disable_reductions(&self) -> Result<(), Retcode> {
        let off = ffi::SCIP_ParamSetting_SCIP_PARAMSETTING_OFF;
        scip_call! { ffi::SCIPsetPresolving(self.raw, off, true.into()) };
        scip_call! { ffi::SCIPsetHeuristics(self.raw, off, true.into()) };
        scip_call! { ffi::SCIPsetSeparating(self.raw, off, true.into()) };
        self.set_int_param("propagating/maxrounds", 0)?;
        self.set_int_param("propagating/maxroundsroot", 0)?;
        Ok(())
    }

    pub(crate) fn set_obj_sense(&self, sense: ObjSense) -> Result<(), Retcode> {
        let sense = match sense {
            ObjSense::Minimize => ffi::SCIP_Objsense_SCIP_OBJSENSE_MINIMIZE,
            ObjSense::Maximize => ffi::SCIP_Objsense_SCIP_OBJSENSE_MAXIMIZE,
        };
        scip_call!(ffi::SCIPsetObjsense(self.raw, sense));
        Ok(())
    }

    fn infinity(&self) -> f64 {
        unsafe { ffi::SCIPinfinity(self.raw) }
    }

    pub(crate) fn create_var(&mut self, spec: &VarSpec) -> Result<*mut ffi::SCIP_VAR, Retcode> {
        let name = c_name(&spec.name)?;
        let inf = self.infinity();
        let var_type = match spec.var_type {
            VarType::Continuous => ffi::SCIP_Vartype_SCIP_VARTYPE_CONTINUOUS,
            VarType::Integer => ffi::SCIP_Vartype_SCIP_VARTYPE_INTEGER,
        };
        let mut var_ptr = MaybeUninit::uninit();
        scip_call! { ffi::SCIPcreateVarBasic(
            self.raw,
            var_ptr.as_mut_ptr(),
            name.as_ptr(),
            spec.lb.max(-inf),
            spec.ub.min(inf),
            spec.obj,
            var_type,
        ) };
        let var_ptr = unsafe { var_ptr.assume_init() };
        // captured from here on; released in drop even if adding fails
        self.vars.push(var_ptr);
        scip_call! { ffi::SCIPaddVar(self.raw, var_ptr) };
        Ok(var_ptr)
    }

    pub(crate) fn create_linear_cons(
        &mut self,
        spec: &RowSpec,
        vars: &[*mut ffi::SCIP_VAR],
    ) -> Result<*mut ffi::SCIP_CONS, Retcode> {
        let name = c_name(&spec.name)?;
        let inf = self.infinity();
        let mut cons_ptr = MaybeUninit::uninit();
        scip_call! { ffi::SCIPcreateConsBasicLinear(
            self.raw,
            cons_ptr.as_mut_ptr(),
            name.as_ptr(),
            0,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            spec.lhs.max(-inf),
            spec.rhs.min(inf),
        ) };
        let cons_ptr = unsafe { cons_ptr.assume_init() };
        self.conss.push(cons_ptr);
        for &(var, coef) in &spec.coefs {
            let var_ptr = *vars.get(var).ok_or(Retcode::InvalidData)?;
            scip_call! { ffi::SCIPaddCoefLinear(self.raw, cons_ptr, var_ptr, coef) };
        }
        scip_call! { ffi::SCIPaddCons(self.raw, cons_ptr) };
        Ok(cons_ptr)
    }

    pub(crate) fn solve(&self) -> Result<(), Retcode> {
        scip_call!(ffi::SCIPsolve(self.raw));
        Ok(())
    }

    pub(crate) fn status(&self) -> Status {
        let status = unsafe { ffi::SCIPgetStatus(self.raw) };
        status.into()
    }

    pub(crate) fn best_sol(&self) -> Option<*mut ffi::SCIP_SOL> {
        let n_sols = unsafe { ffi::SCIPgetNSols(self.raw) };
        if n_sols == 0 {
            return None;
        }
        Some(unsafe { ffi::SCIPgetBestSol(self.raw) })
    }

    pub(crate) fn sol_obj_val(&self, sol: *mut ffi::SCIP_SOL) -> f64 {
        unsafe { ffi::SCIPgetSolOrigObj(self.raw, sol) }
    }

    pub(crate) fn sol_val(&self, sol: *mut ffi::SCIP_SOL, var: *mut ffi::SCIP_VAR) -> f64 {
        unsafe { ffi::SCIPgetSolVal(self.raw, sol, var) }
    }

    /// Dual value of a linear constraint in the last LP solved.
    ///
    /// The value is read from the LP row of the transformed constraint, which
    /// stays alive until the instance is freed.
    pub(crate) fn dual_sol(&self, cons: *mut ffi::SCIP_CONS) -> Result<f64, Retcode> {
        let mut transformed = MaybeUninit::uninit();
        scip_call! { ffi::SCIPgetTransformedCons(self.raw, cons, transformed.as_mut_ptr()) };
        let transformed = unsafe { transformed.assume_init() };
        if transformed.is_null() {
            // removed before the LP was built, so its row was never binding
            return Ok(0.0);
        }
        let dual = unsafe { ffi::SCIPgetDualsolLinear(self.raw, transformed) };
        // the LP is always a minimization internally
        let sense = unsafe { ffi::SCIPgetObjsense(self.raw) };
        if sense == ffi::SCIP_Objsense_SCIP_OBJSENSE_MAXIMIZE {
            Ok(-dual)
        } else {
            Ok(dual)
        }
    }
}

impl Drop for ScipPtr {
    fn drop(&mut self) {
        for cons in self.conss.iter_mut() {
            let retcode = Retcode::from(unsafe { ffi::SCIPreleaseCons(self.raw, cons) });
            if retcode != Retcode::Okay {
                warn!(event = "release_failed", kind = "constraint", %retcode);
            }
        }
        for var in self.vars.iter_mut() {
            let retcode = Retcode::from(unsafe { ffi::SCIPreleaseVar(self.raw, var) });
            if retcode != Retcode::Okay {
                warn!(event = "release_failed", kind = "variable", %retcode);
            }
        }
        unsafe { ffi::SCIPfree(&mut self.raw) };
    }
}

fn c_name(name: &str) -> Result<CString, Retcode> {
    CString::new(name).map_err(|_| Retcode::InvalidData)
}
